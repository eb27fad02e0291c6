//! Aria Catalog Client
//!
//! HTTP client for the music catalog API that Aria searches and plays from.
//!
//! # Features
//!
//! - **Search**: songs, artists and albums, paged
//! - **Song detail**: fetch a single song by id
//! - **Normalization**: loosely shaped payloads become [`Track`],
//!   [`ArtistSummary`] and [`AlbumSummary`] at this boundary
//!
//! # Example
//!
//! ```no_run
//! use aria_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("https://saavn.sumit.co"))?;
//!
//!     let albums = client.search_albums("coldplay", 1).await?;
//!     println!("{} of {} albums", albums.items.len(), albums.total);
//!
//!     if let Some(track) = client.get_song("IHrIFLbJ").await? {
//!         println!("{} ({}s)", track.name, track.duration_seconds);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! [`Track`]: aria_core::Track

mod client;
mod error;
pub mod normalize;
mod types;

pub use client::CatalogClient;
pub use error::{CatalogError, Result};
pub use normalize::UNKNOWN_ARTIST;
pub use types::{AlbumSummary, ArtistSummary, CatalogConfig, SearchResults, DEFAULT_BASE_URL};
