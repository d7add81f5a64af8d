pub type ClipcheckResult<T> = Result<T, ClipcheckError>;

/// Failures that stop a check from running at all.
///
/// Defects found *inside* a template are never errors; they are reported as
/// [`crate::ValidationResult`] entries. This type covers the cases where there is no template to
/// look at (unreadable file, malformed JSON) or the checker itself is misconfigured.
#[derive(thiserror::Error, Debug)]
pub enum ClipcheckError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClipcheckError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
