//! Types for catalog API requests and responses.

use aria_core::types::{select_variant, MediaVariant, PREFERRED_ARTWORK_QUALITY};
use serde::Deserialize;
use std::time::Duration;

/// Public catalog instance used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://saavn.sumit.co";

/// Configuration for connecting to the catalog API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the API (e.g., "https://saavn.sumit.co")
    pub base_url: String,
    /// Results requested per search page
    pub page_size: u32,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl CatalogConfig {
    /// Create a config for a base URL with default paging and timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// =============================================================================
// Normalized results
// =============================================================================

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    /// Total matches reported by the server across all pages
    pub total: u64,
    /// 1-based page this slice belongs to
    pub page: u32,
}

impl<T> SearchResults<T> {
    pub(crate) fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
        }
    }

    /// Whether another page is available after this one.
    pub fn has_more(&self, page_size: u32) -> bool {
        u64::from(self.page) * u64::from(page_size) < self.total
    }
}

/// Artist as returned by artist search.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub artwork: Vec<MediaVariant>,
}

impl ArtistSummary {
    /// Best artwork URL, if any
    pub fn artwork_url(&self) -> Option<&str> {
        select_variant(&self.artwork, PREFERRED_ARTWORK_QUALITY).map(|v| v.url.as_str())
    }
}

/// Album as returned by album search.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumSummary {
    pub id: String,
    pub name: String,
    pub artist_display_name: String,
    pub year: Option<String>,
    pub song_count: Option<u32>,
    pub artwork: Vec<MediaVariant>,
}

impl AlbumSummary {
    /// Best artwork URL, if any
    pub fn artwork_url(&self) -> Option<&str> {
        select_variant(&self.artwork, PREFERRED_ARTWORK_QUALITY).map(|v| v.url.as_str())
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// `{success, data}` wrapper around every response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the search endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Artist credit: either a preformatted line or a list of credited artists.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ArtistField {
    Line(String),
    Credits(Vec<ArtistCredit>),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ArtistCredit {
    #[serde(default)]
    pub name: String,
}

/// Grouped credits on newer song payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ArtistGroups {
    #[serde(default)]
    pub primary: Vec<ArtistCredit>,
}

/// Image or stream field: a bare URL or an ascending list of variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum MediaField {
    Url(String),
    Variants(Vec<WireVariant>),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireVariant {
    #[serde(default)]
    pub quality: String,
    #[serde(alias = "link")]
    pub url: String,
}

/// Numbers the API sometimes sends as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseNumber {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSong {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub duration: Option<LooseNumber>,
    #[serde(default)]
    pub primary_artists: Option<ArtistField>,
    #[serde(default)]
    pub artists: Option<ArtistGroups>,
    #[serde(default)]
    pub image: Option<MediaField>,
    #[serde(default)]
    pub download_url: Option<MediaField>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireArtist {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub image: Option<MediaField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireAlbum {
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub year: Option<LooseNumber>,
    #[serde(default)]
    pub primary_artists: Option<ArtistField>,
    #[serde(default)]
    pub artists: Option<ArtistGroups>,
    #[serde(default)]
    pub song_count: Option<LooseNumber>,
    #[serde(default)]
    pub image: Option<MediaField>,
}
