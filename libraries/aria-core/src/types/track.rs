/// Track domain type
use super::media::{select_variant, MediaVariant, PREFERRED_ARTWORK_QUALITY, PREFERRED_STREAM_QUALITY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog identifier of a track
pub type TrackId = String;

/// Playable song
///
/// Identity is `id`: two values with the same `id` are the same queue entry
/// even when other fields differ (catalog endpoints return slightly different
/// shapes for the same song).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub name: String,

    /// Duration reported by the catalog
    pub duration_seconds: u32,

    /// Artist line shown to the user
    pub artist_display_name: String,

    /// Artwork variants, ascending quality
    #[serde(default)]
    pub artwork: Vec<MediaVariant>,

    /// Stream variants, ascending quality
    #[serde(default)]
    pub streams: Vec<MediaVariant>,
}

impl Track {
    /// Create a track with no artwork or streams
    pub fn new(id: impl Into<TrackId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_seconds: 0,
            artist_display_name: String::new(),
            artwork: Vec::new(),
            streams: Vec::new(),
        }
    }

    /// Set the artist line
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_display_name = artist.into();
        self
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Set the artwork variants
    #[must_use]
    pub fn with_artwork(mut self, artwork: Vec<MediaVariant>) -> Self {
        self.artwork = artwork;
        self
    }

    /// Set the stream variants
    #[must_use]
    pub fn with_streams(mut self, streams: Vec<MediaVariant>) -> Self {
        self.streams = streams;
        self
    }

    /// Same queue entry as `other`
    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_seconds))
    }

    /// Best artwork URL, if any
    pub fn artwork_url(&self) -> Option<&str> {
        select_variant(&self.artwork, PREFERRED_ARTWORK_QUALITY).map(|v| v.url.as_str())
    }

    /// Best stream URL, if any
    pub fn stream_url(&self) -> Option<&str> {
        self.stream_url_preferring(PREFERRED_STREAM_QUALITY)
    }

    /// Stream URL preferring a specific quality tier
    pub fn stream_url_preferring(&self, quality: &str) -> Option<&str> {
        select_variant(&self.streams, quality).map(|v| v.url.as_str())
    }
}
