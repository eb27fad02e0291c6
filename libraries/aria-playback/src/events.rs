//! Player events
//!
//! Emitted by the coordinator at key points so a UI can follow along without
//! diffing full state snapshots:
//! - Status changes (loading, playing, paused, idle)
//! - Track changes
//! - Queue edits
//! - Position updates (one per applied transport status)

use serde::{Deserialize, Serialize};

use crate::types::{PlayerStatus, RepeatMode};

/// Events emitted by the player coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Derived status changed
    StatusChanged {
        /// The new status
        status: PlayerStatus,
    },

    /// Selected track changed
    TrackChanged {
        /// ID of the new (current) track, `None` when the queue emptied
        track_id: Option<String>,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Queue contents changed
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Position update from the transport
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, if known
        duration_ms: Option<u64>,
    },

    /// Track reached its natural end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Shuffle or repeat toggled
    ModesChanged { shuffle: bool, repeat: RepeatMode },

    /// Non-fatal error (failed load, unreadable persisted state)
    Error {
        /// Error message
        message: String,
    },
}
