//! The coloring session: owns both surfaces, routes pointer input to the stroke renderer or the
//! fill engine, and reallocates buffers when the device pixel ratio changes.

use std::path::Path;
use std::time::Instant;

use rand::Rng;

use crate::assets::catalog::OutlineCatalog;
use crate::assets::outline::OutlineArt;
use crate::config::ColoringConfig;
use crate::fill::engine::{FillOutcome, FillRequest, flood_fill};
use crate::foundation::core::{LogicalSize, Point, Rgba8};
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::render::export::{encode_png, flatten, write_png};
use crate::render::stroke::{StrokeRenderer, StrokeSegment};
use crate::session::input::{GestureState, InputEffect, Tool, ToolState};
use crate::surface::buffer::Surface;
use crate::surface::mask::OutlineMask;
use crate::view::mapper::{BackingTransform, CoordinateMapper};
use crate::view::resize::ResizeDebouncer;
use crate::view::viewport::Viewport;

/// Result of applying a resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeEffect {
    /// No buffers exist yet.
    NotAttached,
    /// Only the on-screen size changed; buffers kept.
    DisplayOnly,
    /// Buffers were reallocated for a new device pixel ratio.
    Reallocated,
}

#[derive(Clone, Debug)]
struct Layers {
    transform: BackingTransform,
    paint: Surface,
    outline: Surface,
    mask: OutlineMask,
}

/// A coloring canvas bound to a host viewport.
#[derive(Debug)]
pub struct ColoringSession<V: Viewport> {
    config: ColoringConfig,
    viewport: V,
    mapper: CoordinateMapper,
    layers: Option<Layers>,
    art: Option<OutlineArt>,
    gesture: GestureState,
    strokes: StrokeRenderer,
    resize: ResizeDebouncer,
}

impl<V: Viewport> ColoringSession<V> {
    /// Create a detached session. Buffers are allocated by [`Self::attach`].
    pub fn new(config: ColoringConfig, viewport: V) -> ColorbookResult<Self> {
        config.validate()?;
        let logical = config.logical_size()?;
        let resize = ResizeDebouncer::new(config.resize_debounce());
        Ok(Self {
            config,
            viewport,
            mapper: CoordinateMapper::new(logical),
            layers: None,
            art: None,
            gesture: GestureState::Idle,
            strokes: StrokeRenderer::new(),
            resize,
        })
    }

    /// Allocate both surfaces for the viewport's current device pixel ratio.
    ///
    /// Calling it again reallocates; existing paint is resampled into the new buffers.
    pub fn attach(&mut self) -> ColorbookResult<()> {
        let dpr = self.viewport.device_pixel_ratio();
        let transform = BackingTransform::new(self.logical_size(), dpr)?;
        self.reallocate(transform)?;
        tracing::info!(
            width = transform.width(),
            height = transform.height(),
            dpr = transform.dpr(),
            "canvas attached"
        );
        Ok(())
    }

    /// `true` once buffers exist.
    pub fn is_attached(&self) -> bool {
        self.layers.is_some()
    }

    /// Session configuration.
    pub fn config(&self) -> &ColoringConfig {
        &self.config
    }

    /// Fixed logical canvas size.
    pub fn logical_size(&self) -> LogicalSize {
        self.mapper.logical()
    }

    /// Host viewport.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Mutable host viewport; follow changes with [`Self::notify_resize`].
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Current gesture state.
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Backing transform of the current allocation.
    pub fn transform(&self) -> Option<&BackingTransform> {
        self.layers.as_ref().map(|l| &l.transform)
    }

    /// Paint surface.
    pub fn paint(&self) -> Option<&Surface> {
        self.layers.as_ref().map(|l| &l.paint)
    }

    /// Rasterized outline surface.
    pub fn outline(&self) -> Option<&Surface> {
        self.layers.as_ref().map(|l| &l.outline)
    }

    /// Fill barrier mask derived from the outline.
    pub fn mask(&self) -> Option<&OutlineMask> {
        self.layers.as_ref().map(|l| &l.mask)
    }

    /// The outline drawing currently shown.
    pub fn outline_art(&self) -> Option<&OutlineArt> {
        self.art.as_ref()
    }

    /// Show a new outline. Paint is kept; use [`Self::new_image`] to start over.
    pub fn set_outline(&mut self, art: OutlineArt) -> ColorbookResult<()> {
        tracing::info!(outline = art.name(), "outline set");
        self.art = Some(art);
        if let Some(layers) = self.layers.as_mut() {
            let (outline, mask) = build_outline(&self.config, self.art.as_ref(), &layers.transform)?;
            layers.outline = outline;
            layers.mask = mask;
        }
        Ok(())
    }

    /// Pick a random outline from `catalog`, clear the paint, and show it.
    ///
    /// Unreadable entries are replaced with an embedded outline. Returns the chosen entry.
    pub fn new_image<R: Rng + ?Sized>(
        &mut self,
        catalog: &OutlineCatalog,
        rng: &mut R,
    ) -> ColorbookResult<String> {
        let entry = catalog.choose(rng).to_owned();
        let art = catalog.load_or_builtin(&entry)?;
        self.clear_paint();
        self.set_outline(art)?;
        Ok(entry)
    }

    /// Erase all paint. The outline is untouched.
    pub fn clear_paint(&mut self) {
        if let Some(layers) = self.layers.as_mut() {
            layers.paint.clear();
        }
    }

    /// Pointer pressed at `client` (display pixels).
    pub fn pointer_down(
        &mut self,
        client: Option<Point>,
        tools: &ToolState,
    ) -> ColorbookResult<InputEffect> {
        if !self.is_attached() {
            tracing::debug!("pointer down before attach ignored");
            return Ok(InputEffect::Ignored);
        }
        let pos = self.map_client(client);
        self.gesture = GestureState::Drawing { last: pos };
        match tools.tool {
            Tool::Fill => Ok(InputEffect::Filled(self.fill_at(pos, tools.color)?)),
            Tool::Brush | Tool::Eraser => self.stroke(pos, pos, tools),
        }
    }

    /// Pointer moved to `client`. Only acts inside a gesture.
    pub fn pointer_move(
        &mut self,
        client: Option<Point>,
        tools: &ToolState,
    ) -> ColorbookResult<InputEffect> {
        let GestureState::Drawing { last } = self.gesture else {
            return Ok(InputEffect::Ignored);
        };
        if !self.is_attached() {
            return Ok(InputEffect::Ignored);
        }
        let pos = self.map_client(client);
        self.gesture = GestureState::Drawing { last: pos };
        match tools.tool {
            Tool::Fill => Ok(InputEffect::Tracked),
            Tool::Brush | Tool::Eraser => self.stroke(last, pos, tools),
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> InputEffect {
        self.end_gesture()
    }

    /// Pointer lost (left the canvas, capture lost).
    pub fn pointer_cancel(&mut self) -> InputEffect {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> InputEffect {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => InputEffect::Ignored,
            GestureState::Drawing { .. } => InputEffect::Released,
        }
    }

    fn map_client(&self, client: Option<Point>) -> Point {
        self.mapper.to_logical(client, self.viewport.display_rect())
    }

    fn stroke(&mut self, from: Point, to: Point, tools: &ToolState) -> ColorbookResult<InputEffect> {
        let Some(layers) = self.layers.as_mut() else {
            return Ok(InputEffect::Ignored);
        };
        let segment = match tools.tool {
            Tool::Eraser => StrokeSegment::erase(from, to, tools.brush_size),
            _ => StrokeSegment::paint(from, to, tools.brush_size, tools.color),
        };
        let touched = self
            .strokes
            .draw_segment(&mut layers.paint, &layers.transform, &segment)?;
        Ok(InputEffect::Stroked { touched })
    }

    /// Flood fill from a logical point with the configured tolerance.
    pub fn fill_at(&mut self, logical: Point, color: Rgba8) -> ColorbookResult<FillOutcome> {
        let Some(layers) = self.layers.as_mut() else {
            return Err(ColorbookError::precondition("fill before the canvas is attached"));
        };
        let request = FillRequest {
            seed: logical,
            color,
            tolerance: self.config.fill_tolerance,
        };
        flood_fill(&mut layers.paint, &layers.mask, &layers.transform, &request)
    }

    /// Record a viewport change at `now`; it is applied by a later [`Self::poll`].
    pub fn notify_resize(&mut self, now: Instant) {
        self.resize.notify(now);
    }

    /// `true` while a resize notification waits to be applied.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Apply a pending resize once its quiet period has passed. Held back while a gesture is
    /// in progress. Returns the applied effect, if any.
    pub fn poll(&mut self, now: Instant) -> ColorbookResult<Option<ResizeEffect>> {
        if matches!(self.gesture, GestureState::Drawing { .. }) {
            return Ok(None);
        }
        if !self.resize.poll(now) {
            return Ok(None);
        }
        self.resize_now().map(Some)
    }

    /// Re-query the viewport and reallocate buffers if the device pixel ratio changed.
    pub fn resize_now(&mut self) -> ColorbookResult<ResizeEffect> {
        self.resize.cancel();
        let Some(current) = self.transform().copied() else {
            return Ok(ResizeEffect::NotAttached);
        };
        let next = BackingTransform::new(self.logical_size(), self.viewport.device_pixel_ratio())?;
        if next.same_buffer_size(&current) {
            tracing::debug!("display-only resize");
            return Ok(ResizeEffect::DisplayOnly);
        }
        self.reallocate(next)?;
        tracing::info!(
            width = next.width(),
            height = next.height(),
            dpr = next.dpr(),
            "buffers reallocated"
        );
        Ok(ResizeEffect::Reallocated)
    }

    fn reallocate(&mut self, transform: BackingTransform) -> ColorbookResult<()> {
        let paint = match self.layers.as_ref() {
            Some(old) => old.paint.resampled(transform.width(), transform.height())?,
            None => Surface::new(transform.width(), transform.height())?,
        };
        let (outline, mask) = build_outline(&self.config, self.art.as_ref(), &transform)?;
        self.layers = Some(Layers {
            transform,
            paint,
            outline,
            mask,
        });
        Ok(())
    }

    /// Flatten paint under outline at the logical resolution.
    pub fn export(&self) -> ColorbookResult<image::RgbaImage> {
        flatten(self.paint(), self.outline(), self.logical_size())
    }

    /// Export encoded as PNG bytes.
    pub fn export_png(&self) -> ColorbookResult<Vec<u8>> {
        encode_png(&self.export()?)
    }

    /// Export written to a PNG file.
    pub fn save_png(&self, path: &Path) -> ColorbookResult<()> {
        write_png(&self.export()?, path)
    }
}

fn build_outline(
    config: &ColoringConfig,
    art: Option<&OutlineArt>,
    transform: &BackingTransform,
) -> ColorbookResult<(Surface, OutlineMask)> {
    let outline = match art {
        Some(art) => art.rasterize(transform, config.outline_margin)?,
        None => Surface::new(transform.width(), transform.height())?,
    };
    let mask = OutlineMask::from_outline(&outline, config.barrier_alpha_threshold);
    Ok((outline, mask))
}

#[cfg(test)]
#[path = "../../tests/unit/session/coloring.rs"]
mod tests;
