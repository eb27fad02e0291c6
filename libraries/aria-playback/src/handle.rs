//! Shared player handle
//!
//! Wraps a [`PlayerCoordinator`] in an async mutex so UI calls and transport
//! status are applied one at a time, and publishes the result:
//! - the latest [`PlaybackState`] on a `watch` channel
//! - every [`PlayerEvent`] on a `broadcast` channel

use std::sync::{Arc, Weak};

use aria_core::Track;
use aria_transport::StatusReceiver;
use tokio::sync::{broadcast, watch, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
    error::Result,
    events::PlayerEvent,
    manager::{AdvanceOutcome, PlayerCoordinator},
    types::{PlaybackState, RepeatMode},
};

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

pub(crate) struct Publisher {
    state_tx: watch::Sender<PlaybackState>,
    events_tx: broadcast::Sender<PlayerEvent>,
}

impl Publisher {
    pub(crate) fn publish(&self, coordinator: &mut PlayerCoordinator) {
        for event in coordinator.drain_events() {
            // No subscribers is fine
            let _ = self.events_tx.send(event);
        }
        self.state_tx.send_replace(coordinator.state());
    }
}

/// Cloneable handle to one player
#[derive(Clone)]
pub struct PlayerHandle {
    coordinator: Arc<Mutex<PlayerCoordinator>>,
    publisher: Arc<Publisher>,
}

impl PlayerHandle {
    /// Wrap a coordinator without consuming transport status
    pub fn new(mut coordinator: PlayerCoordinator) -> Self {
        let (state_tx, _) = watch::channel(coordinator.state());
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let publisher = Arc::new(Publisher { state_tx, events_tx });

        // Lets the coordinator publish the Loading state before it awaits a load
        coordinator.attach_publisher(Arc::clone(&publisher));

        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
            publisher,
        }
    }

    /// Wrap a coordinator and start the driver for its transport status feed
    pub fn spawn(coordinator: PlayerCoordinator, status_rx: StatusReceiver) -> (Self, JoinHandle<()>) {
        let handle = Self::new(coordinator);
        let driver = handle.spawn_driver(status_rx);
        (handle, driver)
    }

    /// Apply transport status events in delivery order
    ///
    /// The task exits when the status channel closes or every handle is
    /// dropped.
    pub fn spawn_driver(&self, mut status_rx: StatusReceiver) -> JoinHandle<()> {
        let coordinator: Weak<Mutex<PlayerCoordinator>> = Arc::downgrade(&self.coordinator);
        let publisher = Arc::clone(&self.publisher);

        tokio::spawn(async move {
            while let Some(status) = status_rx.recv().await {
                let Some(coordinator) = coordinator.upgrade() else {
                    break;
                };
                let mut guard = coordinator.lock().await;
                if let Err(e) = guard.on_transport_status(status).await {
                    warn!(error = %e, "Failed to apply transport status");
                }
                publisher.publish(&mut guard);
            }
            debug!("Player driver stopped");
        })
    }

    /// Receiver of state snapshots
    pub fn subscribe_state(&self) -> watch::Receiver<PlaybackState> {
        self.publisher.state_tx.subscribe()
    }

    /// Receiver of player events
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.publisher.events_tx.subscribe()
    }

    /// Latest published state
    pub fn state(&self) -> PlaybackState {
        self.publisher.state_tx.borrow().clone()
    }

    async fn lock(&self) -> MutexGuard<'_, PlayerCoordinator> {
        self.coordinator.lock().await
    }

    pub async fn play_track(&self, track: Track, new_queue: Option<Vec<Track>>) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.play_track(track, new_queue).await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn toggle_play_pause(&self) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.toggle_play_pause().await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn seek_to(&self, position_ms: u64) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.seek_to(position_ms).await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn play_next(&self) -> Result<AdvanceOutcome> {
        let mut guard = self.lock().await;
        let result = guard.play_next().await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn play_previous(&self) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.play_previous().await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn stop(&self) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.stop().await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn toggle_shuffle(&self) -> bool {
        let mut guard = self.lock().await;
        let shuffle = guard.toggle_shuffle();
        self.publisher.publish(&mut guard);
        shuffle
    }

    pub async fn toggle_repeat(&self) -> RepeatMode {
        let mut guard = self.lock().await;
        let repeat = guard.toggle_repeat();
        self.publisher.publish(&mut guard);
        repeat
    }

    pub async fn add_to_queue(&self, track: Track) -> bool {
        let mut guard = self.lock().await;
        let added = guard.add_to_queue(track);
        self.publisher.publish(&mut guard);
        added
    }

    pub async fn enqueue_next(&self, track: Track) -> bool {
        let mut guard = self.lock().await;
        let added = guard.enqueue_next(track);
        self.publisher.publish(&mut guard);
        added
    }

    pub async fn remove_from_queue(&self, index: usize) -> Result<Track> {
        let mut guard = self.lock().await;
        let result = guard.remove_from_queue(index).await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn reorder_queue(&self, from: usize, to: usize) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.reorder_queue(from, to);
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn clear_queue(&self) -> Result<()> {
        let mut guard = self.lock().await;
        let result = guard.clear_queue().await;
        self.publisher.publish(&mut guard);
        result
    }

    pub async fn load_persisted_data(&self) -> bool {
        let mut guard = self.lock().await;
        let restored = guard.load_persisted_data().await;
        self.publisher.publish(&mut guard);
        restored
    }

    /// Wait for every persistence write issued so far
    pub async fn flush_persistence(&self) {
        self.lock().await.flush_persistence().await;
    }
}
