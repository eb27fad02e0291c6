/// Core error types for Aria
use thiserror::Error;

/// Result type alias using `AriaError`
pub type Result<T> = std::result::Result<T, AriaError>;

/// Core error type for Aria
#[derive(Error, Debug)]
pub enum AriaError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AriaError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
