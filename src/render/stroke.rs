use kurbo::Shape;

use crate::foundation::core::{BezPath, PixelRect, Point, Rect, Rgba8};
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::render::composite::{destination_out_in_place, over_in_place};
use crate::surface::buffer::Surface;
use crate::view::mapper::BackingTransform;

/// Flattening tolerance for stroke outlines, in logical units.
const PATH_TOLERANCE: f64 = 0.05;

/// How a stroke combines with existing paint.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StrokeMode {
    /// Source-over with the stroke color.
    #[default]
    Paint,
    /// Destination-out: removes paint under the stroke, leaving transparency.
    Erase,
}

/// One brush segment in logical space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSegment {
    /// Start point (logical units).
    pub from: Point,
    /// End point (logical units).
    pub to: Point,
    /// Brush diameter (logical units).
    pub width: f64,
    /// Stroke color; ignored when erasing.
    pub color: Rgba8,
    /// Paint or erase.
    pub mode: StrokeMode,
}

impl StrokeSegment {
    /// A painting segment.
    pub fn paint(from: Point, to: Point, width: f64, color: Rgba8) -> Self {
        Self {
            from,
            to,
            width,
            color,
            mode: StrokeMode::Paint,
        }
    }

    /// An erasing segment.
    pub fn erase(from: Point, to: Point, width: f64) -> Self {
        Self {
            from,
            to,
            width,
            color: Rgba8::opaque(0, 0, 0),
            mode: StrokeMode::Erase,
        }
    }

    /// Round-capped outline of the segment in logical space, or `None` for a zero-width brush.
    pub fn outline(&self) -> Option<BezPath> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return None;
        }
        if (self.to - self.from).hypot() <= f64::EPSILON {
            return Some(kurbo::Circle::new(self.from, self.width / 2.0).to_path(PATH_TOLERANCE));
        }
        let style = kurbo::Stroke::new(self.width)
            .with_caps(kurbo::Cap::Round)
            .with_join(kurbo::Join::Round);
        Some(kurbo::stroke(
            kurbo::Line::new(self.from, self.to).path_elements(PATH_TOLERANCE),
            &style,
            &kurbo::StrokeOpts::default(),
            PATH_TOLERANCE,
        ))
    }
}

/// Rasterizes stroke segments onto a paint surface.
///
/// Each segment is rendered by `vello_cpu` into a scratch pixmap the size of the segment's
/// bounding box, then composited into the surface. The render context is reused across calls.
#[derive(Default)]
pub struct StrokeRenderer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for StrokeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeRenderer")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl StrokeRenderer {
    /// Renderer with no cached context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one segment. Returns the touched pixel rectangle, or `None` if nothing was drawn.
    pub fn draw_segment(
        &mut self,
        surface: &mut Surface,
        transform: &BackingTransform,
        segment: &StrokeSegment,
    ) -> ColorbookResult<Option<PixelRect>> {
        if surface.width() != transform.width() || surface.height() != transform.height() {
            return Err(ColorbookError::validation(
                "stroke target does not match the backing transform",
            ));
        }
        let Some(shape) = segment.outline() else {
            return Ok(None);
        };
        let device = transform.affine() * shape;
        let Some(rect) = clip_bounds(device.bounding_box(), surface.width(), surface.height())
        else {
            return Ok(None);
        };

        let w: u16 = rect
            .width
            .try_into()
            .map_err(|_| ColorbookError::validation("stroke bounds width exceeds u16"))?;
        let h: u16 = rect
            .height
            .try_into()
            .map_err(|_| ColorbookError::validation("stroke bounds height exceeds u16"))?;

        let paint = match segment.mode {
            StrokeMode::Paint => segment.color,
            StrokeMode::Erase => Rgba8::opaque(0, 0, 0),
        };
        let cpu_path = bezpath_to_cpu(&device);
        let mut scratch = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                -f64::from(rect.x),
                -f64::from(rect.y),
            )));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                paint.r, paint.g, paint.b, paint.a,
            ));
            ctx.fill_path(&cpu_path);
            ctx.flush();
            ctx.render_to_pixmap(&mut scratch);
        });

        composite_region(surface, rect, scratch.data_as_u8_slice(), segment.mode)?;
        Ok(Some(rect))
    }

    fn with_ctx_mut(&mut self, width: u16, height: u16, f: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        f(&mut ctx);
        self.ctx = Some(ctx);
    }
}

fn clip_bounds(bbox: Rect, width: u32, height: u32) -> Option<PixelRect> {
    if !(bbox.x0.is_finite() && bbox.y0.is_finite() && bbox.x1.is_finite() && bbox.y1.is_finite())
    {
        return None;
    }
    let x0 = bbox.x0.floor().max(0.0);
    let y0 = bbox.y0.floor().max(0.0);
    let x1 = bbox.x1.ceil().min(f64::from(width));
    let y1 = bbox.y1.ceil().min(f64::from(height));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(PixelRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

fn composite_region(
    surface: &mut Surface,
    rect: PixelRect,
    src: &[u8],
    mode: StrokeMode,
) -> ColorbookResult<()> {
    let row_bytes = (rect.width as usize) * 4;
    let stride = (surface.width() as usize) * 4;
    let dst = surface.data_mut();
    for row in 0..rect.height as usize {
        let s = &src[row * row_bytes..(row + 1) * row_bytes];
        let start = (rect.y as usize + row) * stride + (rect.x as usize) * 4;
        let d = &mut dst[start..start + row_bytes];
        match mode {
            StrokeMode::Paint => over_in_place(d, s, 1.0)?,
            StrokeMode::Erase => destination_out_in_place(d, s)?,
        }
    }
    Ok(())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/stroke.rs"]
mod tests;
