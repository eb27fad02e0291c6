/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] aria_catalog::CatalogError),

    #[error("Playback error: {0}")]
    Playback(#[from] aria_playback::PlaybackError),

    #[error("Storage error: {0}")]
    Storage(#[from] aria_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
