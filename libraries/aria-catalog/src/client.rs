//! Catalog API client.

use crate::error::{CatalogError, Result};
use crate::normalize;
use crate::types::{
    AlbumSummary, ApiResponse, ArtistSummary, CatalogConfig, SearchPage, SearchResults, WireAlbum,
    WireArtist, WireSong,
};
use aria_core::Track;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Client for the catalog search and song detail endpoints.
///
/// Every response is normalized before it leaves the client, so callers only
/// see [`Track`], [`ArtistSummary`] and [`AlbumSummary`].
///
/// # Example
///
/// ```no_run
/// use aria_catalog::{CatalogClient, CatalogConfig};
///
/// # async fn example() -> aria_catalog::Result<()> {
/// let client = CatalogClient::new(CatalogConfig::default())?;
///
/// let page = client.search_songs("believer", 1).await?;
/// for track in &page.items {
///     println!("{} - {}", track.name, track.artist_display_name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    page_size: u32,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let trimmed = config.base_url.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = Url::parse(trimmed)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(format!("{trimmed} cannot be a base URL")));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("Aria/{} (CLI)", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size.max(1),
        })
    }

    /// Base URL requests are made against.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Results requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Search songs by free text. `page` is 1-based.
    pub async fn search_songs(&self, query: &str, page: u32) -> Result<SearchResults<Track>> {
        self.search::<WireSong, _>("songs", query, page, normalize::track)
            .await
    }

    /// Search artists by free text. `page` is 1-based.
    pub async fn search_artists(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults<ArtistSummary>> {
        self.search::<WireArtist, _>("artists", query, page, normalize::artist)
            .await
    }

    /// Search albums by free text. `page` is 1-based.
    pub async fn search_albums(&self, query: &str, page: u32) -> Result<SearchResults<AlbumSummary>> {
        self.search::<WireAlbum, _>("albums", query, page, normalize::album)
            .await
    }

    /// Fetch one song by id.
    ///
    /// Returns `None` when the catalog does not know the id.
    pub async fn get_song(&self, id: &str) -> Result<Option<Track>> {
        let url = self.endpoint(&["api", "songs", id])?;
        debug!(url = %url, "Fetching song");

        let response: ApiResponse<Vec<WireSong>> = self.get_json(url, "song").await?;
        if !response.success {
            debug!(id, "Catalog reported no such song");
            return Ok(None);
        }

        Ok(response
            .data
            .and_then(|songs| songs.into_iter().next())
            .map(normalize::track))
    }

    async fn search<W, T>(
        &self,
        kind: &str,
        query: &str,
        page: u32,
        convert: fn(W) -> T,
    ) -> Result<SearchResults<T>>
    where
        W: DeserializeOwned,
    {
        let page = page.max(1);
        let query = query.trim();
        if query.is_empty() {
            debug!(kind, "Skipping search with empty query");
            return Ok(SearchResults::empty(page));
        }

        let mut url = self.endpoint(&["api", "search", kind])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &self.page_size.to_string());

        debug!(url = %url, kind, "Searching catalog");

        let response: ApiResponse<SearchPage<W>> = self.get_json(url, kind).await?;
        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| format!("search {kind} was not successful"));
            warn!(kind, query, %message, "Catalog search failed");
            return Err(CatalogError::ApiFailure(message));
        }

        let Some(data) = response.data else {
            return Ok(SearchResults::empty(page));
        };

        let items: Vec<T> = data.results.into_iter().map(convert).collect();
        debug!(kind, count = items.len(), total = data.total, "Search complete");

        Ok(SearchResults {
            items,
            total: data.total,
            page,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse {} response: {}", what, e))
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
