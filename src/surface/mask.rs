use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::surface::buffer::Surface;

/// Default outline alpha above which a pixel blocks flood fill.
pub const DEFAULT_BARRIER_ALPHA_THRESHOLD: u8 = 10;

/// Per-pixel barrier flags derived from the outline layer's alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineMask {
    width: u32,
    height: u32,
    barrier: Vec<bool>,
}

impl OutlineMask {
    /// Mask with no barriers.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            barrier: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Barrier where the outline's alpha exceeds `threshold`.
    pub fn from_outline(outline: &Surface, threshold: u8) -> Self {
        let barrier = outline
            .data()
            .chunks_exact(4)
            .map(|px| px[3] > threshold)
            .collect();
        Self {
            width: outline.width(),
            height: outline.height(),
            barrier,
        }
    }

    /// Build from explicit row-major flags.
    pub fn from_flags(width: u32, height: u32, barrier: Vec<bool>) -> ColorbookResult<Self> {
        if barrier.len() != (width as usize) * (height as usize) {
            return Err(ColorbookError::validation(
                "mask flags must match width*height",
            ));
        }
        Ok(Self {
            width,
            height,
            barrier,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` when `(x, y)` is a barrier pixel; out-of-range reads are not barriers.
    pub fn is_barrier(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.barrier[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub(crate) fn is_barrier_index(&self, idx: usize) -> bool {
        self.barrier[idx]
    }

    /// Number of barrier pixels.
    pub fn barrier_count(&self) -> usize {
        self.barrier.iter().filter(|&&b| b).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/mask.rs"]
mod tests;
