//! Transport adapter
//!
//! Wraps an [`AudioBackend`] and enforces the loading rules the player relies
//! on:
//!
//! - at most one resource is loaded; loading a track releases the previous one
//! - only one load may be in flight; concurrent requests get
//!   [`TransportError::LoadInProgress`]
//! - every load bumps the generation, and status events are tagged with it
//! - once a resource is released, no event of its generation is sent again

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use aria_core::Track;
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::backend::{AudioBackend, AudioResource};
use crate::error::{Result, TransportError};
use crate::transport::{Generation, Transport, TransportConfig, TransportStatus};

/// Receiving end of the status channel
pub type StatusReceiver = mpsc::UnboundedReceiver<TransportStatus>;

struct ActiveResource {
    generation: Generation,
    resource: Box<dyn AudioResource>,
    poller: Option<JoinHandle<()>>,
}

impl ActiveResource {
    fn abort_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
        }
    }
}

/// Clears the in-flight flag when a load returns, on every path
struct LoadGuard<'a>(&'a AtomicBool);

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Backend-agnostic [`Transport`] implementation
pub struct TransportAdapter {
    backend: Arc<dyn AudioBackend>,
    config: TransportConfig,
    active: Arc<Mutex<Option<ActiveResource>>>,
    generation: AtomicU64,
    loading: AtomicBool,
    status_tx: mpsc::UnboundedSender<TransportStatus>,
}

impl TransportAdapter {
    /// Create an adapter and the single status receiver
    pub fn new(backend: Arc<dyn AudioBackend>, config: TransportConfig) -> (Self, StatusReceiver) {
        let (status_tx, status_rx) = mpsc::unbounded_channel();

        let adapter = Self {
            backend,
            config,
            active: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
            status_tx,
        };

        (adapter, status_rx)
    }

    /// Generation of the most recent load or stop
    pub fn current_generation(&self) -> Generation {
        self.generation.load(Ordering::Acquire)
    }

    /// Check if a resource is currently loaded
    pub async fn is_loaded(&self) -> bool {
        self.active.lock().await.is_some()
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Take the active resource out and unload it
    async fn release_active(&self) -> Option<Generation> {
        let previous = self.active.lock().await.take();
        let mut previous = previous?;

        previous.abort_poller();
        if let Err(e) = previous.resource.stop().await {
            warn!(generation = previous.generation, error = %e, "Failed to stop resource");
        }
        if let Err(e) = previous.resource.unload().await {
            warn!(generation = previous.generation, error = %e, "Failed to unload resource");
        }

        debug!(generation = previous.generation, "Released resource");
        Some(previous.generation)
    }

    fn spawn_poller(&self, generation: Generation) -> JoinHandle<()> {
        let active = Arc::clone(&self.active);
        let status_tx = self.status_tx.clone();
        let period = self.config.status_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Latched until the resource leaves the finished state again
            let mut finish_reported = false;

            loop {
                ticker.tick().await;

                let mut guard = active.lock().await;
                let Some(current) = guard.as_mut().filter(|a| a.generation == generation) else {
                    break;
                };

                let status = match current.resource.status().await {
                    Ok(status) => status,
                    Err(e) => {
                        warn!(generation, error = %e, "Status query failed");
                        continue;
                    }
                };

                let did_finish = status.finished && !finish_reported;
                finish_reported = status.finished;

                let event = TransportStatus {
                    generation,
                    is_playing: status.is_playing,
                    position_ms: status.position_ms,
                    duration_ms: status.duration_ms,
                    did_finish,
                };

                // Send while locked: a released generation never emits again
                let sent = status_tx.send(event).is_ok();
                drop(guard);

                if !sent {
                    debug!(generation, "Status receiver dropped, poller exiting");
                    break;
                }

                if did_finish {
                    debug!(generation, "Track finished");
                }
            }
        })
    }
}

#[async_trait]
impl Transport for TransportAdapter {
    async fn load_and_play(&self, track: &Track) -> Result<Generation> {
        if self.loading.swap(true, Ordering::AcqRel) {
            warn!(track_id = %track.id, "Load rejected: another load is in flight");
            return Err(TransportError::LoadInProgress);
        }
        let _guard = LoadGuard(&self.loading);

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.release_active().await;

        let url = track
            .stream_url_preferring(&self.config.preferred_stream_quality)
            .ok_or_else(|| TransportError::NoPlayableSource {
                track_id: track.id.clone(),
            })?;

        debug!(track_id = %track.id, generation, url, "Opening stream");
        let mut resource = self.backend.open(url).await?;

        if let Err(e) = resource.play().await {
            discard(resource.as_mut(), generation).await;
            return Err(TransportError::load_failure(e.to_string()));
        }

        let mut active = self.active.lock().await;
        if self.generation.load(Ordering::Acquire) != generation {
            drop(active);
            debug!(track_id = %track.id, generation, "Load superseded, discarding resource");
            discard(resource.as_mut(), generation).await;
            return Err(TransportError::Superseded);
        }

        // The poller's first lock waits until this guard is released
        let poller = self.spawn_poller(generation);
        *active = Some(ActiveResource {
            generation,
            resource,
            poller: Some(poller),
        });

        info!(track_id = %track.id, generation, "Track loaded");
        Ok(generation)
    }

    async fn pause(&self) -> Result<()> {
        let mut active = self.active.lock().await;
        let Some(current) = active.as_mut() else {
            debug!("Pause ignored: nothing loaded");
            return Ok(());
        };
        current.resource.pause().await
    }

    async fn resume(&self) -> Result<()> {
        let mut active = self.active.lock().await;
        let Some(current) = active.as_mut() else {
            debug!("Resume ignored: nothing loaded");
            return Ok(());
        };
        current.resource.play().await
    }

    async fn seek(&self, position_ms: u64) -> Result<()> {
        let mut active = self.active.lock().await;
        let Some(current) = active.as_mut() else {
            debug!(position_ms, "Seek ignored: nothing loaded");
            return Ok(());
        };
        current.resource.seek(position_ms).await
    }

    async fn stop(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(generation) = self.release_active().await {
            info!(generation, "Playback stopped");
        }
        Ok(())
    }
}

impl Drop for TransportAdapter {
    fn drop(&mut self) {
        if let Ok(mut active) = self.active.try_lock() {
            if let Some(current) = active.as_mut() {
                current.abort_poller();
            }
        }
    }
}

/// Unload a resource that never became active
async fn discard(resource: &mut dyn AudioResource, generation: Generation) {
    if let Err(e) = resource.unload().await {
        warn!(generation, error = %e, "Failed to unload discarded resource");
    }
}
