//! Aria - Playback Coordination
//!
//! Queue and transport coordination for the Aria player.
//!
//! This crate provides:
//! - Ordered queue with a cursor that follows its track across edits
//! - Play, pause, seek, next and previous over any [`Transport`]
//! - Shuffle (no immediate repeats) and repeat modes (Off, All, One)
//! - Auto-advance on natural end of track
//! - Queue and last-track persistence through a [`KeyValueStore`]
//! - A cloneable [`PlayerHandle`] publishing state and events
//!
//! # Architecture
//!
//! `aria-playback` never touches an audio resource. The transport owns it and
//! reports status tagged with a load generation; the coordinator drops any
//! status that does not belong to the track it last loaded.
//!
//! # Example: Basic Playback
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use aria_core::{MediaVariant, Track};
//! use aria_playback::{PlaybackConfig, PlayerCoordinator, PlayerHandle};
//! use aria_storage::MemoryKeyValueStore;
//! use aria_transport::{SilentBackend, TransportAdapter, TransportConfig};
//!
//! # async fn example() -> aria_playback::Result<()> {
//! let (transport, status_rx) =
//!     TransportAdapter::new(Arc::new(SilentBackend::default()), TransportConfig::default());
//!
//! let coordinator = PlayerCoordinator::new(
//!     PlaybackConfig::default(),
//!     Arc::new(transport),
//!     Arc::new(MemoryKeyValueStore::new()),
//! );
//! let (player, _driver) = PlayerHandle::spawn(coordinator, status_rx);
//!
//! let track = Track::new("abc", "Song")
//!     .with_streams(vec![MediaVariant::new("320kbps", "https://cdn.example/abc.mp4")]);
//! player.play_track(track, None).await?;
//! player.toggle_play_pause().await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Transport`]: aria_transport::Transport
//! [`KeyValueStore`]: aria_core::KeyValueStore

pub mod error;
pub mod events;
pub mod handle;
pub mod manager;
pub mod persistence;
pub mod queue;
pub mod shuffle;
pub mod types;

pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use handle::PlayerHandle;
pub use manager::{AdvanceOutcome, PlayerCoordinator};
pub use queue::Queue;
pub use types::{PlaybackConfig, PlaybackState, PlayerStatus, RepeatMode};
