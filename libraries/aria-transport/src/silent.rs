//! Silent backend
//!
//! Simulates stream playback against the tokio clock without producing any
//! audio. Used by the CLI and by tests (including paused-clock tests, since
//! positions come from `tokio::time::Instant`).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::backend::{AudioBackend, AudioResource, ResourceStatus};
use crate::error::{Result, TransportError};

/// Backend whose resources advance in real (or paused) time
#[derive(Debug, Clone)]
pub struct SilentBackend {
    default_duration: Duration,
    durations: HashMap<String, Duration>,
    rejected: HashSet<String>,
    open_delay: Option<Duration>,
    opened: Arc<Mutex<Vec<String>>>,
}

impl SilentBackend {
    /// Every opened stream lasts `default_duration` unless overridden
    pub fn new(default_duration: Duration) -> Self {
        Self {
            default_duration,
            durations: HashMap::new(),
            rejected: HashSet::new(),
            open_delay: None,
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the length of one URL
    #[must_use]
    pub fn with_duration(mut self, url: impl Into<String>, duration: Duration) -> Self {
        self.durations.insert(url.into(), duration);
        self
    }

    /// Make opening `url` fail with a load failure
    #[must_use]
    pub fn rejecting(mut self, url: impl Into<String>) -> Self {
        self.rejected.insert(url.into());
        self
    }

    /// Wait this long before every open completes
    #[must_use]
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = Some(delay);
        self
    }

    /// URLs opened so far, in order
    pub async fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().await.clone()
    }
}

impl Default for SilentBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(180))
    }
}

#[async_trait]
impl AudioBackend for SilentBackend {
    async fn open(&self, url: &str) -> Result<Box<dyn AudioResource>> {
        if let Some(delay) = self.open_delay {
            tokio::time::sleep(delay).await;
        }

        self.opened.lock().await.push(url.to_string());

        if self.rejected.contains(url) {
            return Err(TransportError::load_failure(format!("stream rejected: {url}")));
        }

        let duration = self.durations.get(url).copied().unwrap_or(self.default_duration);
        debug!(url, duration_ms = duration.as_millis() as u64, "Opened silent stream");

        Ok(Box::new(SilentResource::new(duration)))
    }
}

/// Clock-driven resource
#[derive(Debug)]
struct SilentResource {
    duration_ms: u64,
    base_ms: u64,
    started_at: Option<Instant>,
    unloaded: bool,
}

impl SilentResource {
    fn new(duration: Duration) -> Self {
        Self {
            duration_ms: duration.as_millis() as u64,
            base_ms: 0,
            started_at: None,
            unloaded: false,
        }
    }

    fn position_ms(&self) -> u64 {
        let elapsed = self
            .started_at
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);
        (self.base_ms + elapsed).min(self.duration_ms)
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.unloaded {
            return Err(TransportError::resource("resource already unloaded"));
        }
        Ok(())
    }

    fn halt(&mut self) {
        self.base_ms = self.position_ms();
        self.started_at = None;
    }
}

#[async_trait]
impl AudioResource for SilentResource {
    async fn play(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        if self.started_at.is_none() && self.position_ms() < self.duration_ms {
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    async fn pause(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        self.halt();
        Ok(())
    }

    async fn seek(&mut self, position_ms: u64) -> Result<()> {
        self.ensure_loaded()?;
        let playing = self.started_at.is_some();
        self.base_ms = position_ms.min(self.duration_ms);
        self.started_at = playing.then(Instant::now);
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        self.started_at = None;
        self.base_ms = 0;
        Ok(())
    }

    async fn unload(&mut self) -> Result<()> {
        self.started_at = None;
        self.unloaded = true;
        Ok(())
    }

    async fn status(&mut self) -> Result<ResourceStatus> {
        self.ensure_loaded()?;

        let position_ms = self.position_ms();
        let finished = position_ms >= self.duration_ms;
        if finished {
            self.halt();
        }

        Ok(ResourceStatus {
            is_playing: self.started_at.is_some(),
            position_ms,
            duration_ms: Some(self.duration_ms),
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_position_follows_clock() {
        let backend = SilentBackend::new(Duration::from_secs(10));
        let mut resource = backend.open("https://cdn/a.mp4").await.unwrap();

        resource.play().await.unwrap();
        tokio::time::advance(Duration::from_millis(1500)).await;

        let status = resource.status().await.unwrap();
        assert!(status.is_playing);
        assert_eq!(status.position_ms, 1500);
        assert!(!status.finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_position() {
        let backend = SilentBackend::new(Duration::from_secs(10));
        let mut resource = backend.open("u").await.unwrap();

        resource.play().await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;
        resource.pause().await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;

        let status = resource.status().await.unwrap();
        assert!(!status.is_playing);
        assert_eq!(status.position_ms, 2000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishes_and_restarts_after_seek() {
        let backend = SilentBackend::new(Duration::from_secs(1));
        let mut resource = backend.open("u").await.unwrap();

        resource.play().await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;

        let status = resource.status().await.unwrap();
        assert!(status.finished);
        assert!(!status.is_playing);
        assert_eq!(status.position_ms, 1000);

        resource.seek(0).await.unwrap();
        resource.play().await.unwrap();
        let status = resource.status().await.unwrap();
        assert!(!status.finished);
        assert!(status.is_playing);
    }

    #[tokio::test]
    async fn test_rejected_url_fails_to_open() {
        let backend = SilentBackend::default().rejecting("bad");

        let result = backend.open("bad").await;
        assert!(matches!(result, Err(TransportError::LoadFailure(_))));
        assert_eq!(backend.opened_urls().await, vec!["bad".to_string()]);
    }

    #[tokio::test]
    async fn test_unloaded_resource_rejects_calls() {
        let backend = SilentBackend::default();
        let mut resource = backend.open("u").await.unwrap();

        resource.unload().await.unwrap();
        assert!(resource.play().await.is_err());
        assert!(resource.status().await.is_err());
    }
}
