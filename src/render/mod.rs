pub(crate) mod composite;
pub(crate) mod export;
pub(crate) mod stroke;
