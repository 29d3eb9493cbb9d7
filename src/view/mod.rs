pub(crate) mod mapper;
pub(crate) mod resize;
pub(crate) mod viewport;
