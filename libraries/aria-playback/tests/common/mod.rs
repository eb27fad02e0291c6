//! Shared test helpers for coordinator tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use aria_core::{MediaVariant, Track};
use aria_playback::{PlaybackConfig, PlayerCoordinator};
use aria_storage::MemoryKeyValueStore;
use aria_transport::{Generation, Transport, TransportError, TransportStatus};
use async_trait::async_trait;

/// Transport call recorded by [`FakeTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(String),
    Pause,
    Resume,
    Seek(u64),
    Stop,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<Call>,
    generation: Generation,
    failing: HashSet<String>,
}

/// In-process transport that records every call
#[derive(Default)]
pub struct FakeTransport {
    state: Mutex<FakeState>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loads of this track id fail
    pub fn fail_track(&self, track_id: &str) {
        self.state.lock().unwrap().failing.insert(track_id.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn loads(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Load(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn load_and_play(&self, track: &Track) -> aria_transport::Result<Generation> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Load(track.id.clone()));

        if track.streams.is_empty() {
            return Err(TransportError::NoPlayableSource {
                track_id: track.id.clone(),
            });
        }
        if state.failing.contains(&track.id) {
            return Err(TransportError::load_failure("connection reset"));
        }

        state.generation += 1;
        Ok(state.generation)
    }

    async fn pause(&self) -> aria_transport::Result<()> {
        self.record(Call::Pause);
        Ok(())
    }

    async fn resume(&self) -> aria_transport::Result<()> {
        self.record(Call::Resume);
        Ok(())
    }

    async fn seek(&self, position_ms: u64) -> aria_transport::Result<()> {
        self.record(Call::Seek(position_ms));
        Ok(())
    }

    async fn stop(&self) -> aria_transport::Result<()> {
        self.record(Call::Stop);
        Ok(())
    }
}

pub fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"))
        .with_artist("Test Artist")
        .with_duration_seconds(180)
        .with_streams(vec![
            MediaVariant::new("96kbps", format!("https://cdn.test/{id}_96.mp4")),
            MediaVariant::new("320kbps", format!("https://cdn.test/{id}_320.mp4")),
        ])
}

pub fn create_tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| create_test_track(id)).collect()
}

pub struct Fixture {
    pub coordinator: PlayerCoordinator,
    pub transport: Arc<FakeTransport>,
    pub store: MemoryKeyValueStore,
}

pub fn create_fixture(config: PlaybackConfig) -> Fixture {
    create_fixture_with_store(config, MemoryKeyValueStore::new())
}

pub fn create_fixture_with_store(config: PlaybackConfig, store: MemoryKeyValueStore) -> Fixture {
    let transport = Arc::new(FakeTransport::new());
    let coordinator = PlayerCoordinator::new(config, transport.clone(), Arc::new(store.clone()));
    Fixture {
        coordinator,
        transport,
        store,
    }
}

/// Status event for whatever the coordinator loaded last
pub fn status_for(coordinator: &PlayerCoordinator, position_ms: u64, did_finish: bool) -> TransportStatus {
    TransportStatus {
        generation: coordinator.active_generation().expect("a track should be loaded"),
        is_playing: !did_finish,
        position_ms,
        duration_ms: Some(180_000),
        did_finish,
    }
}

pub fn queue_ids(coordinator: &PlayerCoordinator) -> Vec<String> {
    coordinator
        .queue()
        .tracks()
        .iter()
        .map(|t| t.id.clone())
        .collect()
}

/// Cursor points at the current track, and is `None` only for an empty queue
pub fn assert_cursor_invariant(coordinator: &PlayerCoordinator) {
    let state = coordinator.state();
    match state.cursor {
        None => {
            assert!(state.queue.is_empty(), "cursor cleared on non-empty queue");
            assert!(state.current_track.is_none());
        }
        Some(cursor) => {
            assert!(cursor < state.queue.len(), "cursor {cursor} out of range");
            let current = state.current_track.as_ref().expect("current track");
            assert_eq!(state.queue[cursor].id, current.id);
        }
    }
}
