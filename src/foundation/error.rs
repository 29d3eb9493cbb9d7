/// Convenience result type used across colorbook.
pub type ColorbookResult<T> = Result<T, ColorbookError>;

/// Top-level error taxonomy used by the coloring core.
#[derive(thiserror::Error, Debug)]
pub enum ColorbookError {
    /// Invalid caller-provided data (sizes, colors, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation was attempted before its required state existed.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Outline sources, manifests, or other external assets could not be used.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ColorbookError {
    /// Build a [`ColorbookError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ColorbookError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`ColorbookError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ColorbookError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
