/// `aria play`
use std::future::Future;
use std::io::Write;
use std::sync::Arc;

use aria_catalog::CatalogClient;
use aria_core::{KeyValueStore, Track};
use aria_playback::{persistence, PlayerEvent, RepeatMode};
use clap::ValueEnum;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::config::AriaSettings;
use crate::error::{CliError, Result};
use crate::output;
use crate::session::{fetch_track, silent_backend_for, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    Off,
    All,
    One,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Off => RepeatMode::Off,
            RepeatArg::All => RepeatMode::All,
            RepeatArg::One => RepeatMode::One,
        }
    }
}

/// How a `play` run ended
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaySummary {
    /// Ids of tracks that played to their end, in order
    pub finished: Vec<String>,
    /// Stopped by the shutdown signal rather than the end of the queue
    pub interrupted: bool,
}

/// Start a session whose silent backend knows every track it may play
///
/// Returns the requested track, looked up in the persisted queue first.
pub async fn prepare(
    settings: &AriaSettings,
    store: Arc<dyn KeyValueStore>,
    catalog: CatalogClient,
    track_id: Option<&str>,
) -> Result<(Session, Option<Track>)> {
    let persisted = persistence::load(store.as_ref()).await;
    for error in &persisted.errors {
        warn!(error = %error, "Ignoring unreadable saved player state");
    }
    let mut known = persisted.queue.unwrap_or_default();

    let requested = match track_id {
        Some(id) => Some(match known.iter().find(|t| t.id == id) {
            Some(track) => track.clone(),
            None => fetch_track(&catalog, id).await?,
        }),
        None => None,
    };
    known.extend(requested.iter().cloned());

    let backend = silent_backend_for(&known, &settings.transport.preferred_stream_quality);
    let session = Session::start(settings, store, catalog, backend).await;
    Ok((session, requested))
}

/// Play until the queue ends or `shutdown` resolves, printing progress
pub async fn run(
    session: &Session,
    requested: Option<Track>,
    out: &mut impl Write,
    shutdown: impl Future<Output = ()>,
) -> Result<PlaySummary> {
    let player = session.player();
    let mut events = player.subscribe_events();
    let mut state_rx = player.subscribe_state();

    match requested {
        Some(track) => player.play_track(track, None).await?,
        None => {
            if player.state().cursor.is_none() {
                return Err(CliError::NotFound("nothing queued to play".to_string()));
            }
            player.toggle_play_pause().await?;
        }
    }

    let state = player.state();
    writeln!(out, "{}", output::modes(state.shuffle, state.repeat))?;

    let mut renderer = Renderer::default();
    if let Some(track) = &state.current_track {
        renderer.now_playing(track, out)?;
    }
    let mut summary = PlaySummary::default();

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            () = &mut shutdown => {
                summary.interrupted = true;
                break;
            }
            event = events.recv() => match event {
                Ok(event) => renderer.render(session, event, out, &mut summary)?,
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "Player events lagged"),
                Err(RecvError::Closed) => break,
            },
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                if !state.is_playing && !state.is_busy_loading {
                    break;
                }
            }
        }
    }

    // Events published with the final state are already queued
    while let Ok(event) = events.try_recv() {
        renderer.render(session, event, out, &mut summary)?;
    }

    writeln!(out)?;
    if summary.interrupted {
        writeln!(out, "Interrupted")?;
    } else {
        writeln!(out, "Queue finished ({} played)", summary.finished.len())?;
    }
    Ok(summary)
}

#[derive(Default)]
struct Renderer {
    current: Option<String>,
    last_second: Option<u64>,
}

impl Renderer {
    fn now_playing(&mut self, track: &Track, out: &mut impl Write) -> Result<()> {
        self.current = Some(track.id.clone());
        self.last_second = None;
        writeln!(out, "Now playing: {}", output::track_line(track))?;
        Ok(())
    }

    fn render(
        &mut self,
        session: &Session,
        event: PlayerEvent,
        out: &mut impl Write,
        summary: &mut PlaySummary,
    ) -> Result<()> {
        match event {
            PlayerEvent::TrackChanged {
                track_id: Some(id), ..
            } => {
                if self.current.as_deref() != Some(id.as_str()) {
                    let state = session.player().state();
                    if let Some(track) = state.queue.iter().find(|t| t.id == id) {
                        self.now_playing(track, out)?;
                    }
                }
            }
            PlayerEvent::PositionUpdate {
                position_ms,
                duration_ms,
            } => {
                let second = position_ms / 1000;
                if self.last_second != Some(second) {
                    self.last_second = Some(second);
                    write!(out, "\r  {}", output::progress(position_ms, duration_ms))?;
                    out.flush()?;
                }
            }
            PlayerEvent::TrackFinished { track_id } => {
                writeln!(out)?;
                self.current = None;
                summary.finished.push(track_id);
            }
            PlayerEvent::Error { message } => {
                writeln!(out)?;
                writeln!(out, "Error: {message}")?;
            }
            PlayerEvent::TrackChanged { track_id: None, .. }
            | PlayerEvent::StatusChanged { .. }
            | PlayerEvent::QueueChanged { .. }
            | PlayerEvent::ModesChanged { .. } => {}
        }
        Ok(())
    }
}
