use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{ColorbookError, ColorbookResult};

/// Parse SVG bytes into a tree that can be re-rasterized at any resolution.
pub fn parse_svg(bytes: &[u8]) -> ColorbookResult<Arc<usvg::Tree>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(ColorbookError::asset("svg has an empty canvas"));
    }
    Ok(Arc::new(tree))
}

/// Read and parse an SVG file.
pub fn read_svg(path: &std::path::Path) -> ColorbookResult<Arc<usvg::Tree>> {
    let bytes = std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
    parse_svg(&bytes)
}
