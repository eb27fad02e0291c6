//! Backend seam: opens stream URLs into controllable resources
//!
//! The adapter owns at most one [`AudioResource`] at a time. Backends only
//! need to know how to open a URL and report where playback is.

use async_trait::async_trait;

use crate::error::Result;

/// Snapshot of a loaded resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceStatus {
    /// Audio is currently audible
    pub is_playing: bool,

    /// Playback position in milliseconds
    pub position_ms: u64,

    /// Total length in milliseconds, if the backend knows it
    pub duration_ms: Option<u64>,

    /// Playback reached the natural end of the resource
    pub finished: bool,
}

/// Opens stream URLs
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Open `url` without starting playback
    async fn open(&self, url: &str) -> Result<Box<dyn AudioResource>>;
}

/// A single opened stream
#[async_trait]
pub trait AudioResource: Send {
    async fn play(&mut self) -> Result<()>;

    async fn pause(&mut self) -> Result<()>;

    async fn seek(&mut self, position_ms: u64) -> Result<()>;

    async fn stop(&mut self) -> Result<()>;

    /// Release the underlying stream. The resource is unusable afterwards.
    async fn unload(&mut self) -> Result<()>;

    async fn status(&mut self) -> Result<ResourceStatus>;
}
