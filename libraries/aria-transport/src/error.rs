/// Transport errors
use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Transport errors
#[derive(Debug, Error)]
pub enum TransportError {
    /// Track carries no stream variant that can be played
    #[error("No playable source for track {track_id}")]
    NoPlayableSource { track_id: String },

    /// Another load has not finished yet
    #[error("A load is already in progress")]
    LoadInProgress,

    /// Backend could not open or start the resource
    #[error("Failed to load audio: {0}")]
    LoadFailure(String),

    /// `stop` or a newer load ran while this load was in flight
    #[error("Load superseded by a newer request")]
    Superseded,

    /// Loaded resource rejected a control call
    #[error("Resource error: {0}")]
    Resource(String),
}

impl TransportError {
    /// Create a load failure error
    pub fn load_failure(msg: impl Into<String>) -> Self {
        Self::LoadFailure(msg.into())
    }

    /// Create a resource error
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}
