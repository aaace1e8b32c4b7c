/// Convenience result type used across scrollmotion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by section and host APIs.
///
/// Only activation and configuration surface errors to callers. Failures inside a scheduled
/// frame are logged and isolated to that frame instead.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid section configuration or scenario data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A host refused a scroll listener or frame registration during activation.
    #[error("registration error: {0}")]
    Registration(String),

    /// Timeline state misuse reported by a host collaborator.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Errors when serializing or deserializing configuration and reports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Registration`] value.
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }

    /// Build a [`MotionError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
