/// Convenience result type used across the rubric editor.
pub type RubricResult<T> = Result<T, RubricError>;

/// Top-level error taxonomy used by editor and transcoder APIs.
#[derive(thiserror::Error, Debug)]
pub enum RubricError {
    /// An editor state or edit argument breaks a structural invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Persisted rubric data that cannot be turned into an editor state.
    #[error("malformed rubric: {0}")]
    Malformed(String),

    /// A level, skill or anchor index outside the current bounds.
    #[error("index error: {0}")]
    Index(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RubricError {
    /// Build a [`RubricError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RubricError::Malformed`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Build a [`RubricError::Index`] value.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    /// Build a [`RubricError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
