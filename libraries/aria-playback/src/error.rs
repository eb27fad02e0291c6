//! Error types for playback coordination

use aria_transport::TransportError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track has no stream variant that can be played
    #[error("No playable source for track {track_id}")]
    NoPlayableSource { track_id: String },

    /// Transport could not load or start the track
    #[error("Failed to load track: {0}")]
    LoadFailure(String),

    /// Persisted state could not be read, decoded, or written
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Queue index or track id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

impl PlaybackError {
    /// Create a persistence failure
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::PersistenceFailure(msg.into())
    }

    /// Index outside the current queue
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::NotFound(format!("queue index {index} (queue length {len})"))
    }
}

impl From<TransportError> for PlaybackError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NoPlayableSource { track_id } => Self::NoPlayableSource { track_id },
            other => Self::LoadFailure(other.to_string()),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
