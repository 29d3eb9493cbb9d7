//! Flatten the paint and outline layers into one image at logical resolution.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::LogicalSize;
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::composite::over_in_place;
use crate::surface::buffer::Surface;

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "coloring.png";

/// Composite `outline` over `paint` at `logical` size, on a transparent background.
///
/// Both layers are resampled from their backing resolution, so the result is the same for any
/// device pixel ratio. Fails with a precondition error when either layer is missing.
#[tracing::instrument(skip(paint, outline))]
pub fn flatten(
    paint: Option<&Surface>,
    outline: Option<&Surface>,
    logical: LogicalSize,
) -> ColorbookResult<image::RgbaImage> {
    let (Some(paint), Some(outline)) = (paint, outline) else {
        return Err(ColorbookError::precondition(
            "export needs both the paint and outline layers",
        ));
    };

    let mut base = paint.resampled(logical.width, logical.height)?;
    let top = outline.resampled(logical.width, logical.height)?;
    over_in_place(base.data_mut(), top.data(), 1.0)?;

    let mut rgba = base.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(logical.width, logical.height, rgba)
        .ok_or_else(|| ColorbookError::validation("flattened buffer does not form an image"))
}

/// Encode a flattened image as PNG bytes.
pub fn encode_png(img: &image::RgbaImage) -> ColorbookResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write a flattened image to `path` as PNG, creating parent directories.
pub fn write_png(img: &image::RgbaImage, path: &Path) -> ColorbookResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bytes = encode_png(img)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
