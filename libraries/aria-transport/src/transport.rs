//! Transport contract consumed by the player coordinator

use std::time::Duration;

use aria_core::{types::PREFERRED_STREAM_QUALITY, Track};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Monotonic load counter. Status events carry the generation of the load
/// that produced them so stale events can be discarded.
pub type Generation = u64;

/// Upper bound on the status reporting period
pub const MAX_STATUS_INTERVAL: Duration = Duration::from_millis(500);

/// Lower bound on the status reporting period
pub const MIN_STATUS_INTERVAL: Duration = Duration::from_millis(50);

/// Status event emitted while a resource is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportStatus {
    pub generation: Generation,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,

    /// Set on exactly one event per natural end of track
    pub did_finish: bool,
}

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Status reporting period in milliseconds (clamped to 50..=500)
    pub status_interval_ms: u64,

    /// Stream quality label tried before falling back to the last variant
    pub preferred_stream_quality: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: 500,
            preferred_stream_quality: PREFERRED_STREAM_QUALITY.to_string(),
        }
    }
}

impl TransportConfig {
    /// Effective status period
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms).clamp(MIN_STATUS_INTERVAL, MAX_STATUS_INTERVAL)
    }
}

/// Audio transport
///
/// Owns at most one loaded resource. Every method takes `&self`; the
/// implementation serializes access internally.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Release any current resource, load the track's stream and start it
    ///
    /// Returns the generation that subsequent status events will carry.
    async fn load_and_play(&self, track: &Track) -> Result<Generation>;

    /// Pause the loaded resource (no-op when nothing is loaded)
    async fn pause(&self) -> Result<()>;

    /// Resume the loaded resource (no-op when nothing is loaded)
    async fn resume(&self) -> Result<()>;

    /// Seek the loaded resource (no-op when nothing is loaded)
    async fn seek(&self, position_ms: u64) -> Result<()>;

    /// Stop and release the loaded resource; idempotent
    ///
    /// No status event of the released generation is emitted afterwards.
    async fn stop(&self) -> Result<()>;
}
