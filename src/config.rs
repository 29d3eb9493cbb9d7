use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::fill::engine::DEFAULT_FILL_TOLERANCE;
use crate::foundation::core::{LogicalSize, Rgba8};
use crate::foundation::error::{ColorbookError, ColorbookResult};
use crate::session::input::{Tool, ToolState};
use crate::surface::mask::DEFAULT_BARRIER_ALPHA_THRESHOLD;

/// Tunables of a coloring session. Every field has a default; unknown JSON keys are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColoringConfig {
    /// Logical canvas width.
    pub logical_width: u32,
    /// Logical canvas height.
    pub logical_height: u32,
    /// Per-channel tolerance of the fill tool.
    pub fill_tolerance: u8,
    /// Outline alpha above which a pixel blocks fills.
    pub barrier_alpha_threshold: u8,
    /// Quiet period before a resize notification is applied.
    pub resize_debounce_ms: u64,
    /// Logical inset around the fitted outline.
    pub outline_margin: f64,
    /// Initial brush diameter in logical units.
    pub brush_size: f64,
    /// Initial paint color.
    pub color: Rgba8,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            logical_width: 1200,
            logical_height: 720,
            fill_tolerance: DEFAULT_FILL_TOLERANCE,
            barrier_alpha_threshold: DEFAULT_BARRIER_ALPHA_THRESHOLD,
            resize_debounce_ms: 80,
            outline_margin: 16.0,
            brush_size: 12.0,
            color: Rgba8::opaque(0xff, 0x6b, 0x6b),
        }
    }
}

impl ColoringConfig {
    /// Check value ranges.
    pub fn validate(&self) -> ColorbookResult<()> {
        self.logical_size()?;
        if !self.outline_margin.is_finite() || self.outline_margin < 0.0 {
            return Err(ColorbookError::validation(
                "outline_margin must be finite and >= 0",
            ));
        }
        if !self.brush_size.is_finite() || self.brush_size <= 0.0 {
            return Err(ColorbookError::validation(
                "brush_size must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> ColorbookResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ColorbookError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: &Path) -> ColorbookResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Logical canvas size.
    pub fn logical_size(&self) -> ColorbookResult<LogicalSize> {
        LogicalSize::new(self.logical_width, self.logical_height)
    }

    /// Resize debounce as a duration.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Tool state a new session starts with: brush, configured color and size.
    pub fn default_tool_state(&self) -> ToolState {
        ToolState {
            tool: Tool::Brush,
            color: self.color,
            brush_size: self.brush_size,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
