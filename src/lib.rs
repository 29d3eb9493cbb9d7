//! Colorbook is the raster core of a coloring book.
//!
//! A line-art outline sits above a paint layer. Brush and eraser strokes are rasterized into the
//! paint layer, and the fill tool floods regions of it bounded by the outline. Both layers share
//! one logical canvas and are backed by buffers sized for the display's device pixel ratio.
//!
//! - Bind a [`ColoringSession`] to a host [`Viewport`] and [`ColoringSession::attach`] it
//! - Feed pointer events together with the caller-owned [`ToolState`]
//! - Export the flattened picture as PNG at the logical resolution
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod fill;
mod foundation;
mod palette;
mod render;
mod session;
mod surface;
mod view;

pub use crate::foundation::core::{
    Affine, BezPath, DisplayRect, LogicalSize, PixelRect, Point, Rect, Rgba8, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{ColorbookError, ColorbookResult};

pub use crate::assets::builtin::{BUILTIN_OUTLINES, BuiltinOutline, builtin_for};
pub use crate::assets::catalog::{
    CatalogSource, FALLBACK_FILES, IMAGES_PREFIX, MANIFEST_PATH, OutlineCatalog, normalize_entry,
};
pub use crate::assets::outline::OutlineArt;
pub use crate::assets::svg_raster::{OutlineFit, fit_outline};
pub use crate::config::ColoringConfig;
pub use crate::fill::engine::{
    DEFAULT_FILL_TOLERANCE, FillOutcome, FillRequest, flood_fill, flood_fill_at_pixel,
};
pub use crate::palette::{DEFAULT_PALETTE, Favorites, MAX_FAVORITES};
pub use crate::render::export::{DEFAULT_EXPORT_FILE_NAME, encode_png, flatten, write_png};
pub use crate::render::stroke::{StrokeMode, StrokeRenderer, StrokeSegment};
pub use crate::session::coloring::{ColoringSession, ResizeEffect};
pub use crate::session::input::{GestureState, InputEffect, Tool, ToolState};
pub use crate::surface::buffer::Surface;
pub use crate::surface::mask::{DEFAULT_BARRIER_ALPHA_THRESHOLD, OutlineMask};
pub use crate::view::mapper::{BackingTransform, CoordinateMapper, MAX_BACKING_DIM};
pub use crate::view::resize::ResizeDebouncer;
pub use crate::view::viewport::{FixedViewport, Viewport};
