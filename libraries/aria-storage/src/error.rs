/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for aria_core::AriaError {
    fn from(err: StorageError) -> Self {
        aria_core::AriaError::storage(err.to_string())
    }
}
