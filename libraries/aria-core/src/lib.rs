//! Aria Core
//!
//! Platform-agnostic core types, traits, and error handling for Aria.
//!
//! This crate provides the foundational building blocks shared by the
//! transport, playback, storage and catalog crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track` and its artwork/stream `MediaVariant`s
//! - **Core Traits**: `KeyValueStore` (durable string storage)
//! - **Error Handling**: Unified `AriaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{MediaVariant, Track};
//!
//! let track = Track::new("song-1", "My Favorite Song")
//!     .with_artist("Artist Name")
//!     .with_duration_seconds(215)
//!     .with_streams(vec![
//!         MediaVariant::new("96kbps", "https://cdn.example.com/96.mp4"),
//!         MediaVariant::new("320kbps", "https://cdn.example.com/320.mp4"),
//!     ]);
//!
//! assert_eq!(track.stream_url(), Some("https://cdn.example.com/320.mp4"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use traits::KeyValueStore;
pub use types::{MediaVariant, Track, TrackId};
