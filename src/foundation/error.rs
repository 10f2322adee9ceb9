/// Convenience result type used across pancanvas.
pub type PanResult<T> = Result<T, PanError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PanError {
    /// Malformed geometry, keyframe or configuration input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Derived geometry requested before its inputs were set.
    #[error("missing geometry: {0}")]
    MissingGeometry(String),

    /// Misuse of the placement engine (unknown element, no reference).
    #[error("placement error: {0}")]
    Placement(String),

    /// Errors while resampling or compositing pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A [`CancelToken`](crate::CancelToken) was triggered.
    #[error("operation cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanError {
    /// Build a [`PanError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanError::MissingGeometry`] value.
    pub fn missing_geometry(msg: impl Into<String>) -> Self {
        Self::MissingGeometry(msg.into())
    }

    /// Build a [`PanError::Placement`] value.
    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    /// Build a [`PanError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
