//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server answered 200 but flagged the call as unsuccessful
    #[error("Catalog API returned failure: {0}")]
    ApiFailure(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid base URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
