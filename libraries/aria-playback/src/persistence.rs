//! Queue and last-track persistence
//!
//! Both values are stored as JSON in a versioned envelope:
//!
//! ```json
//! {"version": 1, "data": [...]}
//! ```
//!
//! Writes go through [`PersistenceWriter`], a detached task fed by an
//! unbounded channel. Callers never wait on a write, writes land in the order
//! they were issued, and failures are logged rather than returned.

use std::sync::Arc;

use aria_core::{KeyValueStore, Track};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::{PlaybackError, Result};

/// Storage key of the serialized queue
pub const QUEUE_KEY: &str = "player.queue";

/// Storage key of the last track handed to the transport
pub const LAST_TRACK_KEY: &str = "player.last_track";

/// Envelope version written by this build
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T: ?Sized> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Wrap `data` in the current envelope
pub fn encode<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    serde_json::to_string(&EnvelopeRef {
        version: ENVELOPE_VERSION,
        data,
    })
    .map_err(|e| PlaybackError::persistence(format!("encode failed: {e}")))
}

/// Unwrap an envelope, rejecting unknown versions and malformed payloads
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let probe: VersionProbe = serde_json::from_str(raw)
        .map_err(|e| PlaybackError::persistence(format!("malformed envelope: {e}")))?;

    if probe.version != ENVELOPE_VERSION {
        return Err(PlaybackError::persistence(format!(
            "unsupported envelope version {}",
            probe.version
        )));
    }

    let envelope: Envelope<T> = serde_json::from_str(raw)
        .map_err(|e| PlaybackError::persistence(format!("malformed payload: {e}")))?;
    Ok(envelope.data)
}

/// Values read back at startup
///
/// A value that could not be read or decoded is `None` and its error is kept
/// in `errors`.
#[derive(Debug, Default)]
pub struct PersistedPlayer {
    pub queue: Option<Vec<Track>>,
    pub last_track: Option<Track>,
    pub errors: Vec<PlaybackError>,
}

/// Read both persisted values
pub async fn load(store: &dyn KeyValueStore) -> PersistedPlayer {
    let mut persisted = PersistedPlayer::default();

    match read_key::<Vec<Track>>(store, QUEUE_KEY).await {
        Ok(queue) => persisted.queue = queue,
        Err(e) => persisted.errors.push(e),
    }
    match read_key::<Track>(store, LAST_TRACK_KEY).await {
        Ok(track) => persisted.last_track = track,
        Err(e) => persisted.errors.push(e),
    }

    for error in &persisted.errors {
        warn!(error = %error, "Ignoring persisted player state");
    }

    persisted
}

async fn read_key<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let raw = store
        .get(key)
        .await
        .map_err(|e| PlaybackError::persistence(format!("read {key}: {e}")))?;

    raw.as_deref().map(decode::<T>).transpose()
}

enum WriteCommand {
    Put { key: &'static str, value: String },
    Remove { key: &'static str },
    Flush(oneshot::Sender<()>),
}

/// Ordered fire-and-forget writer
///
/// Cloning shares the same background task. The task exits once every
/// clone is dropped.
#[derive(Clone)]
pub struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl PersistenceWriter {
    /// Spawn the writer task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteCommand>();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    WriteCommand::Put { key, value } => match store.set(key, &value).await {
                        Ok(()) => debug!(key, bytes = value.len(), "Persisted player state"),
                        Err(e) => warn!(key, error = %e, "Failed to persist player state"),
                    },
                    WriteCommand::Remove { key } => match store.remove(key).await {
                        Ok(()) => debug!(key, "Removed player state"),
                        Err(e) => warn!(key, error = %e, "Failed to remove player state"),
                    },
                    WriteCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("Persistence writer stopped");
        });

        Self { tx }
    }

    /// Queue the full track list for writing
    pub fn save_queue(&self, tracks: &[Track]) {
        self.put(QUEUE_KEY, encode(tracks));
    }

    /// Queue the last played track for writing
    pub fn save_last_track(&self, track: &Track) {
        self.put(LAST_TRACK_KEY, encode(track));
    }

    /// Queue removal of the last played track
    pub fn forget_last_track(&self) {
        if self.tx.send(WriteCommand::Remove { key: LAST_TRACK_KEY }).is_err() {
            warn!(key = LAST_TRACK_KEY, "Persistence writer is gone, dropping removal");
        }
    }

    /// Wait until every write issued so far has been attempted
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    fn put(&self, key: &'static str, value: Result<String>) {
        let value = match value {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Skipping persistence write");
                return;
            }
        };

        if self.tx.send(WriteCommand::Put { key, value }).is_err() {
            warn!(key, "Persistence writer is gone, dropping write");
        }
    }
}
