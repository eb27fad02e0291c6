//! Core types for playback coordination

use aria_core::Track;
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the `Off -> All -> One -> Off` cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Coarse player status, derived from [`PlaybackState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Nothing selected
    Idle,

    /// Waiting for the transport to load a track
    Loading,

    /// Currently playing
    Playing,

    /// Track selected but not audible
    Paused,
}

/// Observable playback state
///
/// Snapshot produced by the coordinator after every operation. The cursor
/// always points at `current_track` inside `queue`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub cursor: Option<usize>,
    pub queue: Vec<Track>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    pub is_busy_loading: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

impl PlayerStatus {
    pub(crate) fn derive(has_selection: bool, is_busy_loading: bool, is_playing: bool) -> Self {
        if !has_selection {
            Self::Idle
        } else if is_busy_loading {
            Self::Loading
        } else if is_playing {
            Self::Playing
        } else {
            Self::Paused
        }
    }
}

impl PlaybackState {
    /// Derive the coarse status
    pub fn status(&self) -> PlayerStatus {
        PlayerStatus::derive(self.cursor.is_some(), self.is_busy_loading, self.is_playing)
    }
}

/// Configuration for the player coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Past this position, "previous" restarts the current track (default: 3000)
    pub scrub_back_threshold_ms: u64,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            scrub_back_threshold_ms: 3000,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}
