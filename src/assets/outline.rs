use std::path::Path;
use std::sync::Arc;

use crate::assets::builtin::BuiltinOutline;
use crate::assets::decode::{parse_svg, read_svg};
use crate::assets::svg_raster::rasterize_outline;
use crate::foundation::error::ColorbookResult;
use crate::surface::buffer::Surface;
use crate::view::mapper::BackingTransform;

/// A parsed outline drawing, kept as a vector tree so it can be re-rasterized after a resize.
#[derive(Clone)]
pub struct OutlineArt {
    name: String,
    tree: Arc<usvg::Tree>,
}

impl std::fmt::Debug for OutlineArt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.tree.size();
        f.debug_struct("OutlineArt")
            .field("name", &self.name)
            .field("width", &size.width())
            .field("height", &size.height())
            .finish()
    }
}

impl OutlineArt {
    /// Parse an outline from SVG bytes.
    pub fn from_svg_bytes(name: impl Into<String>, bytes: &[u8]) -> ColorbookResult<Self> {
        Ok(Self {
            name: name.into(),
            tree: parse_svg(bytes)?,
        })
    }

    /// Read an outline from an SVG file.
    pub fn from_svg_file(path: &Path) -> ColorbookResult<Self> {
        Ok(Self {
            name: path.display().to_string(),
            tree: read_svg(path)?,
        })
    }

    /// One of the embedded outlines.
    pub fn builtin(outline: BuiltinOutline) -> ColorbookResult<Self> {
        Self::from_svg_bytes(outline.name, outline.svg.as_bytes())
    }

    /// Where this outline came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Intrinsic SVG size in user units.
    pub fn size(&self) -> (f64, f64) {
        let size = self.tree.size();
        (f64::from(size.width()), f64::from(size.height()))
    }

    /// Rasterize into an outline surface for `transform`, fit inside the canvas with `margin`.
    pub fn rasterize(&self, transform: &BackingTransform, margin: f64) -> ColorbookResult<Surface> {
        rasterize_outline(&self.tree, transform, margin)
    }
}
