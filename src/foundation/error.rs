/// Convenience result type used across filterframes.
pub type FramesResult<T> = Result<T, FramesError>;

/// Top-level error taxonomy used by setup and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramesError {
    /// Invalid transition configuration (filter count, lengths, names).
    #[error("configuration error: {0}")]
    Config(String),

    /// A filter predicate produced something other than a boolean mask.
    #[error("invalid filter result: {0}")]
    InvalidFilterResult(String),

    /// A layer asked for a geometry the tween services cannot drive.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// Errors while parsing or evaluating a predicate expression.
    #[error("expression error: {0}")]
    Expression(String),

    /// Invalid row data handed to a render unit.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramesError {
    /// Build a [`FramesError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FramesError::InvalidFilterResult`] value.
    pub fn invalid_filter_result(msg: impl Into<String>) -> Self {
        Self::InvalidFilterResult(msg.into())
    }

    /// Build a [`FramesError::UnsupportedGeometry`] value.
    pub fn unsupported_geometry(tag: impl Into<String>) -> Self {
        Self::UnsupportedGeometry(tag.into())
    }

    /// Build a [`FramesError::Expression`] value.
    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    /// Build a [`FramesError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramesError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
