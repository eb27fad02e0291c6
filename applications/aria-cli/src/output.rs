//! Terminal formatting for tracks, queues and progress

use aria_catalog::{AlbumSummary, ArtistSummary};
use aria_core::format::{format_duration, format_millis};
use aria_core::Track;
use aria_playback::{PlaybackState, RepeatMode};

/// `Title - Artist [m:ss]`
pub fn track_line(track: &Track) -> String {
    format!(
        "{} - {} [{}]",
        track.name,
        track.artist_display_name,
        format_duration(u64::from(track.duration_seconds))
    )
}

pub fn artist_line(artist: &ArtistSummary) -> String {
    match &artist.role {
        Some(role) => format!("{} ({})", artist.name, role),
        None => artist.name.clone(),
    }
}

pub fn album_line(album: &AlbumSummary) -> String {
    let mut line = format!("{} - {}", album.name, album.artist_display_name);
    if let Some(year) = &album.year {
        line.push_str(&format!(" ({year})"));
    }
    if let Some(count) = album.song_count {
        line.push_str(&format!(", {count} songs"));
    }
    line
}

/// Numbered queue listing, 1-based, with the current entry marked
pub fn queue_listing(state: &PlaybackState) -> Vec<String> {
    if state.queue.is_empty() {
        return vec!["Queue is empty".to_string()];
    }

    let total_secs: u64 = state
        .queue
        .iter()
        .map(|t| u64::from(t.duration_seconds))
        .sum();

    let mut lines: Vec<String> = state
        .queue
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if state.cursor == Some(i) { '>' } else { ' ' };
            format!("{marker} {:>3}. {}", i + 1, track_line(track))
        })
        .collect();

    lines.push(format!(
        "{} tracks, {}",
        state.queue.len(),
        format_duration(total_secs)
    ));
    lines
}

/// `1:05 / 3:20`, or just the position when the duration is unknown
pub fn progress(position_ms: u64, duration_ms: Option<u64>) -> String {
    match duration_ms {
        Some(duration) => format!("{} / {}", format_millis(position_ms), format_millis(duration)),
        None => format_millis(position_ms),
    }
}

pub fn modes(shuffle: bool, repeat: RepeatMode) -> String {
    let repeat = match repeat {
        RepeatMode::Off => "off",
        RepeatMode::All => "all",
        RepeatMode::One => "one",
    };
    format!("shuffle {}, repeat {}", if shuffle { "on" } else { "off" }, repeat)
}
