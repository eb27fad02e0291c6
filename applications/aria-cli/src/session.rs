//! Wiring of store, catalog and player for one CLI invocation

use std::sync::Arc;

use aria_catalog::CatalogClient;
use aria_core::{KeyValueStore, Track};
use aria_playback::{PlayerCoordinator, PlayerHandle};
use aria_storage::{open_database, SqliteKeyValueStore};
use aria_transport::{SilentBackend, TransportAdapter};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::AriaSettings;
use crate::error::{CliError, Result};

/// Open the configured SQLite database as a key-value store
pub async fn open_store(settings: &AriaSettings) -> Result<Arc<dyn KeyValueStore>> {
    let pool = open_database(&settings.storage.database_url).await?;
    info!(url = %settings.storage.database_url, "Database connected");
    Ok(Arc::new(SqliteKeyValueStore::new(pool)))
}

/// Silent backend that plays each known track for its catalog duration
pub fn silent_backend_for<'a>(
    tracks: impl IntoIterator<Item = &'a Track>,
    preferred_quality: &str,
) -> SilentBackend {
    tracks
        .into_iter()
        .filter(|t| t.duration_seconds > 0)
        .fold(SilentBackend::default(), |backend, track| {
            match track.stream_url_preferring(preferred_quality) {
                Some(url) => backend.with_duration(url, track.duration()),
                None => backend,
            }
        })
}

/// A running player with its persisted queue restored
pub struct Session {
    player: PlayerHandle,
    catalog: CatalogClient,
    driver: JoinHandle<()>,
}

impl Session {
    pub async fn start(
        settings: &AriaSettings,
        store: Arc<dyn KeyValueStore>,
        catalog: CatalogClient,
        backend: SilentBackend,
    ) -> Self {
        let (transport, status_rx) =
            TransportAdapter::new(Arc::new(backend), settings.transport.clone());
        let coordinator =
            PlayerCoordinator::new(settings.playback.clone(), Arc::new(transport), store);
        let (player, driver) = PlayerHandle::spawn(coordinator, status_rx);

        let restored = player.load_persisted_data().await;
        debug!(restored, queue = player.state().queue.len(), "Session started");

        Self {
            player,
            catalog,
            driver,
        }
    }

    pub fn player(&self) -> &PlayerHandle {
        &self.player
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Track by id, from the restored queue if present, else the catalog
    pub async fn resolve_track(&self, id: &str) -> Result<Track> {
        if let Some(track) = self.player.state().queue.into_iter().find(|t| t.id == id) {
            return Ok(track);
        }
        fetch_track(&self.catalog, id).await
    }

    /// Stop playback, wait for pending writes and stop the driver
    pub async fn shutdown(self) -> Result<()> {
        let stopped = self.player.stop().await;
        self.player.flush_persistence().await;
        self.driver.abort();
        stopped.map_err(CliError::from)
    }
}

/// Fetch a song from the catalog, failing when it does not exist
pub async fn fetch_track(catalog: &CatalogClient, id: &str) -> Result<Track> {
    catalog
        .get_song(id)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("song {id}")))
}
