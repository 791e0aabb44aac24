/// Convenience result type used across scrollphase.
pub type PhaseResult<T> = Result<T, PhaseError>;

/// Top-level error taxonomy.
///
/// Only construction-time problems surface as errors. Runtime degradations (missing targets,
/// repeated dispose, unavailable scroll surface) are handled in place and never reach callers.
#[derive(thiserror::Error, Debug)]
pub enum PhaseError {
    /// Invalid user-provided data (offsets, units, pin distances).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while assembling a timeline from tracks or a sequence.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Errors while evaluating a timeline at a progress value.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Operation not permitted in the controller's current lifecycle state.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhaseError {
    /// Build a [`PhaseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhaseError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`PhaseError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`PhaseError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`PhaseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PhaseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
