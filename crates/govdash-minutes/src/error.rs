//! Minutes generation errors

/// Errors from the minutes flow
#[derive(Debug, thiserror::Error)]
pub enum MinutesError {
    /// Model output does not have the required shape
    #[error("invalid minutes response: {0}")]
    Validation(String),

    /// Model answered, but not with usable text
    #[error("model error: {0}")]
    Model(String),

    /// Transport failure talking to the model
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl MinutesError {
    /// Create validation error
    #[inline]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create model error
    #[inline]
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model(message.into())
    }
}

/// Result type alias for minutes operations
pub type MinutesResult<T> = Result<T, MinutesError>;
