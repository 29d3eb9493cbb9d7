use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::foundation::math::{unpremultiply_px, unpremultiply_rgba8_in_place};
use crate::view::mapper::MAX_BACKING_DIM;

/// A backing pixel buffer: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

fn byte_len(width: u32, height: u32) -> ColorbookResult<usize> {
    if width == 0 || height == 0 {
        return Err(ColorbookError::validation("surface width/height must be > 0"));
    }
    if width > MAX_BACKING_DIM || height > MAX_BACKING_DIM {
        return Err(ColorbookError::validation(format!(
            "surface size too large: {width}x{height} (max {MAX_BACKING_DIM}x{MAX_BACKING_DIM})"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ColorbookError::validation("surface buffer size overflow"))
}

impl Surface {
    /// Fully transparent surface.
    pub fn new(width: u32, height: u32) -> ColorbookResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap existing premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> ColorbookResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(ColorbookError::validation(
                "surface bytes must match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
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

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// `true` when `(x, y)` addresses a pixel of this surface.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Premultiplied pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel_premul(&self, x: u32, y: u32) -> Rgba8Premul {
        let o = self.offset(x, y);
        Rgba8Premul {
            r: self.data[o],
            g: self.data[o + 1],
            b: self.data[o + 2],
            a: self.data[o + 3],
        }
    }

    /// Straight-alpha pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        Rgba8::from_array(unpremultiply_px(self.pixel_premul(x, y).to_array()))
    }

    /// Overwrite one pixel with a straight-alpha color (no blending).
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&color.to_premul().to_array());
    }

    /// Alpha at `(x, y)`; identical in premultiplied and straight form.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.offset(x, y) + 3]
    }

    /// Straight-alpha copy of the whole buffer, as a read-only snapshot.
    pub fn straight_snapshot(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Copy of this surface resampled to `width x height` (bilinear).
    ///
    /// Resampling happens on premultiplied data so transparent neighbors do not bleed color.
    pub fn resampled(&self, width: u32, height: u32) -> ColorbookResult<Surface> {
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        byte_len(width, height)?;
        let src = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ColorbookError::validation("surface bytes do not form an image"))?;
        let out = image::imageops::resize(
            &src,
            width,
            height,
            image::imageops::FilterType::Triangle,
        );
        Surface::from_premul_rgba8(width, height, out.into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
