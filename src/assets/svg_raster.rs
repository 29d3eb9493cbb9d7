use crate::foundation::core::{LogicalSize, Vec2};
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::surface::buffer::Surface;
use crate::view::mapper::BackingTransform;

/// Placement of an outline inside the logical canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineFit {
    /// Uniform scale from SVG user units to logical units.
    pub scale: f64,
    /// Logical offset of the SVG's top-left corner.
    pub offset: Vec2,
}

/// Fit an SVG of `size` into `logical`, keeping aspect ratio, centered, inset by `margin`.
///
/// A margin that leaves no room is ignored.
pub fn fit_outline(size: (f64, f64), logical: LogicalSize, margin: f64) -> ColorbookResult<OutlineFit> {
    let (sw, sh) = size;
    if !(sw.is_finite() && sh.is_finite()) || sw <= 0.0 || sh <= 0.0 {
        return Err(ColorbookError::asset("svg has invalid width/height"));
    }
    let lw = f64::from(logical.width);
    let lh = f64::from(logical.height);

    let margin = if margin.is_finite() && margin > 0.0 { margin } else { 0.0 };
    let (aw, ah) = if lw - 2.0 * margin > 0.0 && lh - 2.0 * margin > 0.0 {
        (lw - 2.0 * margin, lh - 2.0 * margin)
    } else {
        (lw, lh)
    };

    let scale = (aw / sw).min(ah / sh);
    let offset = Vec2::new((lw - sw * scale) / 2.0, (lh - sh * scale) / 2.0);
    Ok(OutlineFit { scale, offset })
}

/// Rasterize `tree` into a fresh outline surface sized for `transform`.
pub fn rasterize_outline(
    tree: &usvg::Tree,
    transform: &BackingTransform,
    margin: f64,
) -> ColorbookResult<Surface> {
    let size = tree.size();
    let fit = fit_outline(
        (f64::from(size.width()), f64::from(size.height())),
        transform.logical(),
        margin,
    )?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(transform.width(), transform.height())
        .ok_or_else(|| ColorbookError::asset("failed to allocate outline pixmap"))?;

    let sx = fit.scale * transform.scale_x();
    let sy = fit.scale * transform.scale_y();
    let tx = fit.offset.x * transform.scale_x();
    let ty = fit.offset.y * transform.scale_y();
    let xform =
        resvg::tiny_skia::Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, tx as f32, ty as f32);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Surface::from_premul_rgba8(transform.width(), transform.height(), pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
