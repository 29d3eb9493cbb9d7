pub(crate) mod coloring;
pub(crate) mod input;
