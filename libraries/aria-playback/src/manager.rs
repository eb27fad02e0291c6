//! Player coordinator - core orchestration
//!
//! Owns the queue, cursor, shuffle/repeat modes and the observable playback
//! state, and drives the transport in response to user intent and transport
//! status.
//!
//! Every operation takes `&mut self`, so one intent runs to completion before
//! the next starts. Shared access goes through [`crate::PlayerHandle`].

use std::sync::Arc;

use aria_core::{KeyValueStore, Track};
use aria_transport::{Generation, Transport, TransportStatus};
use tracing::{debug, info, warn};

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    handle::Publisher,
    persistence::{self, PersistenceWriter},
    queue::Queue,
    shuffle,
    types::{PlaybackConfig, PlaybackState, PlayerStatus, RepeatMode},
};

/// What an advance did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Repeat-one restarted the current track
    Restarted,

    /// Started the track at this queue index
    Moved { index: usize },

    /// Sequential playback ran past the last track
    EndOfQueue,

    /// Nothing queued
    Empty,
}

/// Player coordinator
///
/// Handles:
/// - Queue edits with cursor bookkeeping
/// - Play, pause, seek, next and previous
/// - Shuffle and repeat modes
/// - Auto-advance when the transport reports a natural end
/// - Best-effort persistence of the queue and last track
pub struct PlayerCoordinator {
    config: PlaybackConfig,
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
    writer: PersistenceWriter,

    queue: Queue,

    // Playback state
    is_playing: bool,
    position_ms: u64,
    duration_ms: Option<u64>,
    // `duration_ms` was reported by the transport rather than catalog metadata
    duration_reported: bool,
    is_busy_loading: bool,
    shuffle: bool,
    repeat: RepeatMode,

    // Generation of the loaded resource; `None` when nothing is loaded
    active_generation: Option<Generation>,

    // Sequential playback stopped past the last track
    ended: bool,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
    last_status: PlayerStatus,

    // Set when wrapped in a `PlayerHandle`
    publisher: Option<Arc<Publisher>>,
}

impl PlayerCoordinator {
    /// Create a coordinator with an empty queue
    ///
    /// Spawns the persistence writer, so this must run inside a tokio runtime.
    pub fn new(
        config: PlaybackConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let writer = PersistenceWriter::spawn(Arc::clone(&store));

        Self {
            shuffle: config.shuffle,
            repeat: config.repeat,
            config,
            transport,
            store,
            writer,
            queue: Queue::new(),
            is_playing: false,
            position_ms: 0,
            duration_ms: None,
            duration_reported: false,
            is_busy_loading: false,
            active_generation: None,
            ended: false,
            pending_events: Vec::new(),
            last_status: PlayerStatus::Idle,
            publisher: None,
        }
    }

    pub(crate) fn attach_publisher(&mut self, publisher: Arc<Publisher>) {
        self.publisher = Some(publisher);
    }

    // ===== Playback Control =====

    /// Play `track`, optionally replacing the queue first
    ///
    /// The track is located by id and appended when absent, so the cursor
    /// always ends up on it. On failure the selection is kept and the player
    /// is left paused.
    pub async fn play_track(&mut self, track: Track, new_queue: Option<Vec<Track>>) -> Result<()> {
        let previous_id = self.current_id();

        if let Some(tracks) = new_queue {
            self.queue.replace(tracks);
        }
        let index = self.queue.select_or_append(track);

        self.emit_queue_changed();
        self.start_at(index, previous_id).await
    }

    /// Pause when playing, resume when paused
    ///
    /// With a track selected but nothing loaded (for example right after a
    /// restore), starts that track. No-op when nothing is selected.
    pub async fn toggle_play_pause(&mut self) -> Result<()> {
        let Some(index) = self.queue.cursor() else {
            debug!("Toggle ignored: nothing selected");
            return Ok(());
        };

        if self.active_generation.is_none() {
            let previous_id = self.current_id();
            return self.start_at(index, previous_id).await;
        }

        if self.is_playing {
            self.transport.pause().await?;
            self.is_playing = false;
        } else {
            if self.ended {
                self.transport.seek(0).await?;
                self.position_ms = 0;
                self.ended = false;
            }
            self.transport.resume().await?;
            self.is_playing = true;
        }

        self.sync_status();
        Ok(())
    }

    /// Seek the loaded track
    ///
    /// The resource clamps the position. The optimistic position is clamped
    /// only to a duration the transport has reported, and the next status
    /// confirms it. Ignored when nothing is loaded.
    pub async fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        if self.active_generation.is_none() {
            debug!(position_ms, "Seek ignored: nothing loaded");
            return Ok(());
        }

        self.transport.seek(position_ms).await?;

        self.position_ms = match self.duration_ms {
            Some(duration) if self.duration_reported => position_ms.min(duration),
            _ => position_ms,
        };
        self.ended = false;
        self.emit_position();
        Ok(())
    }

    /// Skip to the next track according to shuffle and repeat
    ///
    /// At the end of the queue with repeat off this does nothing.
    pub async fn play_next(&mut self) -> Result<AdvanceOutcome> {
        self.advance(false).await
    }

    /// Go to the previous track
    ///
    /// Past the scrub-back threshold, restarts the current track instead.
    /// Moving back from the first track wraps to the last.
    pub async fn play_previous(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }

        if self.active_generation.is_some() && self.position_ms > self.config.scrub_back_threshold_ms {
            debug!(position_ms = self.position_ms, "Restarting current track");
            self.transport.seek(0).await?;
            self.position_ms = 0;
            self.ended = false;
            self.emit_position();
            return Ok(());
        }

        let Some(index) = self.queue.previous_index() else {
            return Ok(());
        };
        let previous_id = self.current_id();
        self.start_at(index, previous_id).await
    }

    /// Stop playback, keeping the queue and selection
    pub async fn stop(&mut self) -> Result<()> {
        self.transport.stop().await?;
        self.reset_transport_state();
        self.sync_status();
        info!("Playback stopped");
        Ok(())
    }

    /// Apply a transport status event
    ///
    /// Events from a superseded load are dropped. A natural end runs the
    /// advance rules.
    pub async fn on_transport_status(&mut self, status: TransportStatus) -> Result<()> {
        if self.active_generation != Some(status.generation) {
            debug!(
                generation = status.generation,
                active = ?self.active_generation,
                "Dropping stale transport status"
            );
            return Ok(());
        }

        self.is_playing = status.is_playing;
        self.position_ms = status.position_ms;
        if status.duration_ms.is_some() {
            self.duration_ms = status.duration_ms;
            self.duration_reported = true;
        }
        self.emit_position();

        if status.did_finish {
            if let Some(track_id) = self.current_id() {
                info!(track_id = %track_id, "Track finished");
                self.pending_events.push(PlayerEvent::TrackFinished { track_id });
            }
            self.advance(true).await?;
        }

        self.sync_status();
        Ok(())
    }

    // ===== Modes =====

    /// Flip shuffle; the queue order is left alone
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.emit_modes_changed();
        self.shuffle
    }

    /// Cycle repeat `Off -> All -> One -> Off`
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.emit_modes_changed();
        self.repeat
    }

    // ===== Queue Management =====

    /// Append a track unless one with the same id is queued
    ///
    /// Returns whether the queue changed.
    pub fn add_to_queue(&mut self, track: Track) -> bool {
        let previous_id = self.current_id();
        if !self.queue.append_if_absent(track) {
            return false;
        }
        self.after_queue_edit(previous_id);
        true
    }

    /// Insert a track right after the current one unless its id is queued
    ///
    /// Returns whether the queue changed.
    pub fn enqueue_next(&mut self, track: Track) -> bool {
        let previous_id = self.current_id();
        if self.queue.insert_after_cursor(track).is_none() {
            return false;
        }
        self.after_queue_edit(previous_id);
        true
    }

    /// Remove the entry at `index`
    ///
    /// Removing the current entry stops the transport and selects the entry
    /// that took its place (or the new last entry) without playing it.
    pub async fn remove_from_queue(&mut self, index: usize) -> Result<Track> {
        let len = self.queue.len();
        if index >= len {
            return Err(PlaybackError::index_out_of_bounds(index, len));
        }

        let previous_id = self.current_id();
        if self.queue.cursor() == Some(index) {
            self.transport.stop().await?;
            self.reset_transport_state();
        }

        let removed = self
            .queue
            .remove(index)
            .ok_or_else(|| PlaybackError::index_out_of_bounds(index, len))?;
        if self.queue.is_empty() {
            self.duration_ms = None;
            self.duration_reported = false;
        }

        debug!(track_id = %removed.id, index, "Removed from queue");
        self.after_queue_edit(previous_id);
        Ok(removed)
    }

    /// Move the entry at `from` to `to`
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.queue.len();
        let previous_id = self.current_id();
        if !self.queue.move_entry(from, to) {
            return Err(PlaybackError::index_out_of_bounds(from.max(to), len));
        }

        debug!(from, to, cursor = ?self.queue.cursor(), "Reordered queue");
        self.after_queue_edit(previous_id);
        Ok(())
    }

    /// Stop playback and empty the queue
    pub async fn clear_queue(&mut self) -> Result<()> {
        let previous_id = self.current_id();
        self.transport.stop().await?;
        self.reset_transport_state();
        self.duration_ms = None;
        self.duration_reported = false;
        self.queue.clear();
        self.writer.forget_last_track();

        info!("Queue cleared");
        self.after_queue_edit(previous_id);
        Ok(())
    }

    // ===== Persistence =====

    /// Restore the persisted queue and last track
    ///
    /// Never starts playback and never calls the transport. Unreadable
    /// values are reported as error events and treated as absent. Returns
    /// whether a queue was restored.
    pub async fn load_persisted_data(&mut self) -> bool {
        let persisted = persistence::load(self.store.as_ref()).await;
        for error in persisted.errors {
            self.pending_events.push(PlayerEvent::Error {
                message: error.to_string(),
            });
        }

        let Some(tracks) = persisted.queue.filter(|t| !t.is_empty()) else {
            debug!("No persisted queue to restore");
            return false;
        };

        self.queue.replace(tracks);
        if let Some(last) = persisted.last_track {
            let index = self.queue.position(&last.id).unwrap_or(0);
            self.queue.select(index);
        }

        self.reset_transport_state();
        self.emit_queue_changed();
        self.emit_track_changed(None);
        self.sync_status();

        info!(
            queue_len = self.queue.len(),
            cursor = ?self.queue.cursor(),
            "Restored persisted queue"
        );
        true
    }

    /// Wait for every persistence write issued so far
    pub async fn flush_persistence(&self) {
        self.writer.flush().await;
    }

    // ===== State Queries =====

    /// Snapshot of the observable state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.queue.current().cloned(),
            cursor: self.queue.cursor(),
            queue: self.queue.tracks().to_vec(),
            is_playing: self.is_playing,
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
            is_busy_loading: self.is_busy_loading,
            shuffle: self.shuffle,
            repeat: self.repeat,
        }
    }

    pub fn status(&self) -> PlayerStatus {
        PlayerStatus::derive(self.queue.cursor().is_some(), self.is_busy_loading, self.is_playing)
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Generation of the loaded resource
    pub fn active_generation(&self) -> Option<Generation> {
        self.active_generation
    }

    /// Check whether sequential playback ran off the end of the queue
    pub fn is_at_end(&self) -> bool {
        self.ended
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Select `index`, persist, and hand the track to the transport
    async fn start_at(&mut self, index: usize, previous_id: Option<String>) -> Result<()> {
        if !self.queue.select(index) {
            return Err(PlaybackError::index_out_of_bounds(index, self.queue.len()));
        }
        let Some(track) = self.queue.current().cloned() else {
            return Err(PlaybackError::index_out_of_bounds(index, self.queue.len()));
        };

        self.active_generation = None;
        self.is_busy_loading = true;
        self.is_playing = false;
        self.ended = false;
        self.position_ms = 0;
        self.duration_ms = track_duration_ms(&track);
        self.duration_reported = false;

        self.emit_track_changed(previous_id);
        self.sync_status();

        self.writer.save_queue(self.queue.tracks());
        self.writer.save_last_track(&track);
        self.publish_now();

        info!(track_id = %track.id, index, "Loading track");
        let loaded = self.transport.load_and_play(&track).await;
        self.is_busy_loading = false;

        match loaded {
            Ok(generation) => {
                self.active_generation = Some(generation);
                self.is_playing = true;
                self.position_ms = 0;
                debug!(track_id = %track.id, generation, "Track playing");
                self.sync_status();
                Ok(())
            }
            Err(e) => {
                let error = PlaybackError::from(e);
                warn!(track_id = %track.id, error = %error, "Failed to start track");
                self.pending_events.push(PlayerEvent::Error {
                    message: error.to_string(),
                });
                self.sync_status();
                Err(error)
            }
        }
    }

    /// Shared by `play_next` and auto-advance
    async fn advance(&mut self, from_finish: bool) -> Result<AdvanceOutcome> {
        if self.queue.is_empty() {
            return Ok(AdvanceOutcome::Empty);
        }

        if self.repeat == RepeatMode::One {
            if self.active_generation.is_none() {
                let index = self.queue.cursor().unwrap_or(0);
                let previous_id = self.current_id();
                self.start_at(index, previous_id).await?;
            } else {
                self.transport.seek(0).await?;
                self.transport.resume().await?;
                self.position_ms = 0;
                self.is_playing = true;
                self.ended = false;
                self.emit_position();
                self.sync_status();
            }
            return Ok(AdvanceOutcome::Restarted);
        }

        let next = if self.shuffle {
            shuffle::pick_next_index(self.queue.len(), self.queue.cursor())
        } else {
            self.queue.next_index(self.repeat == RepeatMode::All)
        };

        match next {
            Some(index) => {
                let previous_id = self.current_id();
                self.start_at(index, previous_id).await?;
                Ok(AdvanceOutcome::Moved { index })
            }
            None => {
                debug!(from_finish, "Reached end of queue");
                if from_finish {
                    self.is_playing = false;
                    self.ended = true;
                    self.sync_status();
                }
                Ok(AdvanceOutcome::EndOfQueue)
            }
        }
    }

    fn reset_transport_state(&mut self) {
        self.active_generation = None;
        self.is_playing = false;
        self.is_busy_loading = false;
        self.ended = false;
        self.position_ms = 0;
        self.duration_ms = self.queue.current().and_then(track_duration_ms);
        self.duration_reported = false;
    }

    fn after_queue_edit(&mut self, previous_id: Option<String>) {
        self.writer.save_queue(self.queue.tracks());
        self.emit_queue_changed();
        if self.current_id() != previous_id {
            if self.active_generation.is_none() {
                self.duration_ms = self.queue.current().and_then(track_duration_ms);
                self.duration_reported = false;
            }
            self.emit_track_changed(previous_id);
        }
        self.sync_status();
    }

    /// Push pending events and the current snapshot to subscribers
    fn publish_now(&mut self) {
        if let Some(publisher) = self.publisher.clone() {
            publisher.publish(self);
        }
    }

    fn current_id(&self) -> Option<String> {
        self.queue.current().map(|t| t.id.clone())
    }

    fn sync_status(&mut self) {
        let status = self.status();
        if status != self.last_status {
            self.last_status = status;
            self.pending_events.push(PlayerEvent::StatusChanged { status });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_track_changed(&mut self, previous_track_id: Option<String>) {
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: self.current_id(),
            previous_track_id,
        });
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlayerEvent::PositionUpdate {
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
        });
    }

    fn emit_modes_changed(&mut self) {
        self.pending_events.push(PlayerEvent::ModesChanged {
            shuffle: self.shuffle,
            repeat: self.repeat,
        });
    }
}

fn track_duration_ms(track: &Track) -> Option<u64> {
    (track.duration_seconds > 0).then(|| u64::from(track.duration_seconds) * 1000)
}
