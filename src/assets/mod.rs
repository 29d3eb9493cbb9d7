pub(crate) mod builtin;
pub(crate) mod catalog;
pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod outline;
pub(crate) mod svg_raster;
