use crate::fill::engine::FillOutcome;
use crate::foundation::core::{PixelRect, Point, Rgba8};

/// Active drawing tool.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Round brush painting the current color.
    #[default]
    Brush,
    /// Round brush removing paint.
    Eraser,
    /// Flood fill bounded by the outline.
    Fill,
}

/// Caller-owned tool settings, passed into every input call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolState {
    /// Active tool.
    pub tool: Tool,
    /// Paint and fill color.
    pub color: Rgba8,
    /// Brush and eraser diameter in logical units.
    pub brush_size: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        crate::config::ColoringConfig::default().default_tool_state()
    }
}

/// Pointer gesture state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No pointer is down.
    #[default]
    Idle,
    /// A pointer is down; `last` is its most recent logical position.
    Drawing {
        /// Last logical position seen in this gesture.
        last: Point,
    },
}

/// What a pointer event did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEffect {
    /// Nothing happened: not attached, or a move/up outside a gesture.
    Ignored,
    /// A stroke segment was drawn; `touched` is `None` when it fell outside the canvas.
    Stroked {
        /// Backing pixels written.
        touched: Option<PixelRect>,
    },
    /// The fill tool ran.
    Filled(FillOutcome),
    /// The gesture position advanced without drawing.
    Tracked,
    /// The gesture ended.
    Released,
}
