//! Logical canvas space <-> display pixels <-> backing pixels.
//!
//! Input events arrive in display pixels relative to the viewport. The [`CoordinateMapper`] turns
//! them into logical points using the display rectangle current at the time of the event. The
//! [`BackingTransform`] then takes logical points into backing-buffer pixels; one instance is
//! computed per buffer allocation and shared by every layer so paint and outline never drift.

use crate::foundation::core::{Affine, DisplayRect, LogicalSize, Point};
use crate::foundation::error::{ColorbookError, ColorbookResult};

/// Largest backing-buffer dimension accepted on either axis.
pub const MAX_BACKING_DIM: u32 = 16_384;

/// Maps device-space pointer positions onto the logical canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    logical: LogicalSize,
}

impl CoordinateMapper {
    /// Mapper for a fixed logical canvas size.
    pub fn new(logical: LogicalSize) -> Self {
        Self { logical }
    }

    /// Logical canvas size this mapper targets.
    pub fn logical(&self) -> LogicalSize {
        self.logical
    }

    /// Map a client-space position into logical space.
    ///
    /// `display` must be the canvas rectangle as it is right now; callers re-query it per event.
    /// A missing position or an unusable display rectangle yields `(0, 0)`.
    pub fn to_logical(&self, client: Option<Point>, display: DisplayRect) -> Point {
        let Some(client) = client else {
            return Point::ORIGIN;
        };
        if !client.x.is_finite() || !client.y.is_finite() || !display.is_usable() {
            return Point::ORIGIN;
        }
        let x = (client.x - display.x) / display.width * f64::from(self.logical.width);
        let y = (client.y - display.y) / display.height * f64::from(self.logical.height);
        Point::new(x, y)
    }

    /// Inverse of [`Self::to_logical`] for a usable display rectangle.
    pub fn to_client(&self, logical: Point, display: DisplayRect) -> Point {
        Point::new(
            display.x + logical.x / f64::from(self.logical.width) * display.width,
            display.y + logical.y / f64::from(self.logical.height) * display.height,
        )
    }
}

/// Logical -> backing-pixel transform shared by all layers of one allocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackingTransform {
    logical: LogicalSize,
    dpr: f64,
    width: u32,
    height: u32,
}

impl BackingTransform {
    /// Compute buffer dimensions for `logical * dpr`.
    ///
    /// A non-finite or non-positive ratio is treated as `1.0`.
    pub fn new(logical: LogicalSize, dpr: f64) -> ColorbookResult<Self> {
        let dpr = if dpr.is_finite() && dpr > 0.0 {
            dpr
        } else {
            tracing::debug!(dpr, "unusable device pixel ratio, falling back to 1.0");
            1.0
        };

        fn dim(logical: u32, dpr: f64) -> ColorbookResult<u32> {
            let v = (f64::from(logical) * dpr).round().max(1.0);
            if v > f64::from(MAX_BACKING_DIM) {
                return Err(ColorbookError::validation(format!(
                    "backing buffer dimension {v} exceeds {MAX_BACKING_DIM}"
                )));
            }
            Ok(v as u32)
        }

        Ok(Self {
            logical,
            dpr,
            width: dim(logical.width, dpr)?,
            height: dim(logical.height, dpr)?,
        })
    }

    /// Logical canvas size.
    pub fn logical(&self) -> LogicalSize {
        self.logical
    }

    /// Device pixel ratio this allocation was made for.
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Backing buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Backing buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Horizontal scale from logical units to backing pixels.
    pub fn scale_x(&self) -> f64 {
        f64::from(self.width) / f64::from(self.logical.width)
    }

    /// Vertical scale from logical units to backing pixels.
    pub fn scale_y(&self) -> f64 {
        f64::from(self.height) / f64::from(self.logical.height)
    }

    /// The transform as an affine map, for handing to rasterizers.
    pub fn affine(&self) -> Affine {
        Affine::scale_non_uniform(self.scale_x(), self.scale_y())
    }

    /// Logical point -> continuous backing-pixel coordinates.
    pub fn to_backing(&self, p: Point) -> Point {
        Point::new(p.x * self.scale_x(), p.y * self.scale_y())
    }

    /// Backing-pixel coordinates -> logical point.
    pub fn to_logical(&self, p: Point) -> Point {
        Point::new(p.x / self.scale_x(), p.y / self.scale_y())
    }

    /// Logical point -> integer pixel `(round(x), round(y))`, or `None` outside the buffer.
    pub fn to_pixel(&self, p: Point) -> Option<(u32, u32)> {
        let b = self.to_backing(p);
        if !b.x.is_finite() || !b.y.is_finite() {
            return None;
        }
        let x = b.x.round();
        let y = b.y.round();
        if x < 0.0 || y < 0.0 || x >= f64::from(self.width) || y >= f64::from(self.height) {
            return None;
        }
        Some((x as u32, y as u32))
    }

    /// `true` when `other` allocates buffers of the same dimensions.
    pub fn same_buffer_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/mapper.rs"]
mod tests;
