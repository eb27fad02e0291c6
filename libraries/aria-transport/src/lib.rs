//! Audio transport for Aria
//!
//! This crate owns the single loaded audio resource and reports its status
//! to the player coordinator.
//!
//! # Features
//!
//! - One resource at a time; loading a track releases the previous one
//! - Concurrent loads rejected while one is in flight
//! - Status events every 500 ms (or faster), tagged with a load generation
//! - Exactly one `did_finish` per natural end of track
//! - [`SilentBackend`] for headless playback and tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use aria_core::{MediaVariant, Track};
//! use aria_transport::{SilentBackend, Transport, TransportAdapter, TransportConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (transport, mut status) =
//!     TransportAdapter::new(Arc::new(SilentBackend::default()), TransportConfig::default());
//!
//! let track = Track::new("abc", "Song")
//!     .with_streams(vec![MediaVariant::new("320kbps", "https://cdn.example/abc.mp4")]);
//! let generation = transport.load_and_play(&track).await?;
//!
//! while let Some(event) = status.recv().await {
//!     if event.generation == generation && event.did_finish {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod adapter;
pub mod backend;
pub mod error;
pub mod silent;
pub mod transport;

pub use adapter::{StatusReceiver, TransportAdapter};
pub use backend::{AudioBackend, AudioResource, ResourceStatus};
pub use error::{Result, TransportError};
pub use silent::SilentBackend;
pub use transport::{
    Generation, Transport, TransportConfig, TransportStatus, MAX_STATUS_INTERVAL, MIN_STATUS_INTERVAL,
};
