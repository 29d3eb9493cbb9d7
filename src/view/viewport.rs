use crate::foundation::core::DisplayRect;

/// Host-side view of where the canvas currently sits on screen.
///
/// The session queries this on every pointer event and when a debounced resize is applied, so
/// implementations should report live values rather than cached ones.
pub trait Viewport {
    /// Current display rectangle of the canvas, in display pixels relative to the viewport.
    fn display_rect(&self) -> DisplayRect;

    /// Current device pixel ratio (display pixels per CSS/logical pixel).
    fn device_pixel_ratio(&self) -> f64;
}

/// A viewport with explicitly set values, for headless hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedViewport {
    /// Display rectangle reported to the session.
    pub display: DisplayRect,
    /// Device pixel ratio reported to the session.
    pub dpr: f64,
}

impl FixedViewport {
    /// Viewport showing the canvas at `display` with the given ratio.
    pub fn new(display: DisplayRect, dpr: f64) -> Self {
        Self { display, dpr }
    }

    /// Replace the display rectangle (a container resize).
    pub fn set_display(&mut self, display: DisplayRect) {
        self.display = display;
    }

    /// Replace the device pixel ratio (moving to another monitor, browser zoom).
    pub fn set_dpr(&mut self, dpr: f64) {
        self.dpr = dpr;
    }
}

impl Viewport for FixedViewport {
    fn display_rect(&self) -> DisplayRect {
        self.display
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }
}
