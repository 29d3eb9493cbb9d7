//! Outline-bounded flood fill.
//!
//! The fill reads a straight-alpha snapshot of the paint surface and the outline barrier mask,
//! grows a 4-connected region from the seed with an explicit stack, and only then writes the
//! region back in one pass. Nothing read during traversal is mutated during traversal.

use crate::foundation::core::{PixelRect, Point, Rgba8};
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::surface::buffer::Surface;
use crate::surface::mask::OutlineMask;
use crate::view::mapper::BackingTransform;

/// Default per-channel color distance accepted by the fill tool.
pub const DEFAULT_FILL_TOLERANCE: u8 = 30;

/// A flood-fill request in logical space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillRequest {
    /// Seed point (logical units).
    pub seed: Point,
    /// Color written to every region pixel.
    pub color: Rgba8,
    /// Maximum per-channel absolute difference from the seed color.
    pub tolerance: u8,
}

/// What a fill call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    /// Seed outside the buffer; nothing changed.
    OutOfBounds,
    /// Seed on an outline pixel; nothing changed.
    OnBarrier,
    /// Seed already opaque and within tolerance of the fill color; nothing changed.
    AlreadyFilled,
    /// Region recolored.
    Filled {
        /// Number of pixels written.
        pixels: usize,
        /// Bounding box of the written pixels.
        bounds: PixelRect,
    },
}

impl FillOutcome {
    /// `true` when pixels were written.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

/// Fill from a logical seed, converted through the shared backing transform.
#[tracing::instrument(skip(paint, mask, transform), fields(w = paint.width(), h = paint.height()))]
pub fn flood_fill(
    paint: &mut Surface,
    mask: &OutlineMask,
    transform: &BackingTransform,
    request: &FillRequest,
) -> ColorbookResult<FillOutcome> {
    let Some((x, y)) = transform.to_pixel(request.seed) else {
        tracing::debug!("fill seed outside the canvas");
        return Ok(FillOutcome::OutOfBounds);
    };
    flood_fill_at_pixel(
        paint,
        mask,
        i64::from(x),
        i64::from(y),
        request.color,
        request.tolerance,
    )
}

/// Fill from a seed already expressed in backing-buffer pixels.
pub fn flood_fill_at_pixel(
    paint: &mut Surface,
    mask: &OutlineMask,
    x: i64,
    y: i64,
    color: Rgba8,
    tolerance: u8,
) -> ColorbookResult<FillOutcome> {
    if mask.width() != paint.width() || mask.height() != paint.height() {
        return Err(ColorbookError::validation(
            "outline mask does not match paint surface size",
        ));
    }
    if !paint.contains(x, y) {
        return Ok(FillOutcome::OutOfBounds);
    }
    let (sx, sy) = (x as u32, y as u32);
    if mask.is_barrier(sx, sy) {
        return Ok(FillOutcome::OnBarrier);
    }

    let w = paint.width() as usize;
    let h = paint.height() as usize;
    let snapshot = paint.straight_snapshot();
    let seed_idx = (sy as usize) * w + (sx as usize);
    let target = px(&snapshot, seed_idx);

    if target[3] == 255 && rgb_within(target, color.to_array(), tolerance) {
        return Ok(FillOutcome::AlreadyFilled);
    }

    let region = grow_region(&snapshot, mask, w, h, seed_idx, target, tolerance);
    let (pixels, bounds) = write_region(paint, &region, color);
    tracing::debug!(pixels, "fill complete");
    Ok(match bounds {
        Some(bounds) => FillOutcome::Filled { pixels, bounds },
        // The seed itself always joins the region, so this is unreachable in practice.
        None => FillOutcome::AlreadyFilled,
    })
}

const UNSEEN: u8 = 0;
const IN_REGION: u8 = 1;
const REJECTED: u8 = 2;

/// Classify pixels reachable from `seed_idx`. Each pixel is classified at most once.
fn grow_region(
    snapshot: &[u8],
    mask: &OutlineMask,
    w: usize,
    h: usize,
    seed_idx: usize,
    target: [u8; 4],
    tolerance: u8,
) -> Vec<u8> {
    let mut state = vec![UNSEEN; w * h];
    let mut stack: Vec<usize> = Vec::with_capacity(4096);
    state[seed_idx] = IN_REGION;
    stack.push(seed_idx);

    let visit = |ni: usize, state: &mut Vec<u8>, stack: &mut Vec<usize>| {
        if state[ni] != UNSEEN {
            return;
        }
        if mask.is_barrier_index(ni) || !matches(px(snapshot, ni), target, tolerance) {
            state[ni] = REJECTED;
            return;
        }
        state[ni] = IN_REGION;
        stack.push(ni);
    };

    while let Some(idx) = stack.pop() {
        let x = idx % w;
        let y = idx / w;
        if x > 0 {
            visit(idx - 1, &mut state, &mut stack);
        }
        if x + 1 < w {
            visit(idx + 1, &mut state, &mut stack);
        }
        if y > 0 {
            visit(idx - w, &mut state, &mut stack);
        }
        if y + 1 < h {
            visit(idx + w, &mut state, &mut stack);
        }
    }
    state
}

fn write_region(paint: &mut Surface, region: &[u8], color: Rgba8) -> (usize, Option<PixelRect>) {
    let w = paint.width() as usize;
    let fill = color.to_premul().to_array();
    let data = paint.data_mut();

    let mut count = 0usize;
    let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
    let (mut max_x, mut max_y) = (0usize, 0usize);
    for (idx, _) in region.iter().enumerate().filter(|(_, s)| **s == IN_REGION) {
        data[idx * 4..idx * 4 + 4].copy_from_slice(&fill);
        count += 1;
        let (x, y) = (idx % w, idx / w);
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if count == 0 {
        return (0, None);
    }
    let bounds = PixelRect {
        x: min_x as u32,
        y: min_y as u32,
        width: (max_x - min_x + 1) as u32,
        height: (max_y - min_y + 1) as u32,
    };
    (count, Some(bounds))
}

#[inline(always)]
fn px(flat: &[u8], idx: usize) -> [u8; 4] {
    let o = idx * 4;
    [flat[o], flat[o + 1], flat[o + 2], flat[o + 3]]
}

#[inline(always)]
fn channel_within(a: u8, b: u8, tolerance: u8) -> bool {
    a.abs_diff(b) <= tolerance
}

fn rgb_within(p: [u8; 4], q: [u8; 4], tolerance: u8) -> bool {
    (0..3).all(|i| channel_within(p[i], q[i], tolerance))
}

/// Region membership: every channel within tolerance, or both fully transparent.
#[inline(always)]
fn matches(p: [u8; 4], target: [u8; 4], tolerance: u8) -> bool {
    if p[3] == 0 && target[3] == 0 {
        return true;
    }
    (0..4).all(|i| channel_within(p[i], target[i], tolerance))
}

#[cfg(test)]
#[path = "../../tests/unit/fill/engine.rs"]
mod tests;
