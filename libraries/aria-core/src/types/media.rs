/// Artwork and stream variants
use serde::{Deserialize, Serialize};

/// Preferred stream tier (highest bitrate the catalog serves)
pub const PREFERRED_STREAM_QUALITY: &str = "320kbps";

/// Preferred artwork size
pub const PREFERRED_ARTWORK_QUALITY: &str = "500x500";

/// One quality tier of an artwork image or audio stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaVariant {
    /// Quality label as served by the catalog (e.g. "320kbps", "500x500")
    pub quality: String,

    /// Absolute URL of the resource
    pub url: String,
}

impl MediaVariant {
    /// Create a new variant
    pub fn new(quality: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            quality: quality.into(),
            url: url.into(),
        }
    }
}

/// Pick the best variant from an ascending-quality sequence
///
/// Returns the entry tagged `preferred` if present, otherwise the last entry.
/// Returns `None` for an empty sequence.
pub fn select_variant<'a>(variants: &'a [MediaVariant], preferred: &str) -> Option<&'a MediaVariant> {
    variants
        .iter()
        .find(|v| v.quality == preferred)
        .or_else(|| variants.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(qualities: &[&str]) -> Vec<MediaVariant> {
        qualities
            .iter()
            .map(|q| MediaVariant::new(*q, format!("https://cdn.example.com/{}", q)))
            .collect()
    }

    #[test]
    fn prefers_tagged_quality() {
        let list = variants(&["12kbps", "320kbps", "160kbps"]);
        let picked = select_variant(&list, PREFERRED_STREAM_QUALITY).unwrap();
        assert_eq!(picked.quality, "320kbps");
    }

    #[test]
    fn falls_back_to_last_entry() {
        let list = variants(&["48kbps", "96kbps", "160kbps"]);
        let picked = select_variant(&list, PREFERRED_STREAM_QUALITY).unwrap();
        assert_eq!(picked.quality, "160kbps");
    }

    #[test]
    fn empty_sequence_yields_none() {
        assert!(select_variant(&[], PREFERRED_ARTWORK_QUALITY).is_none());
    }
}
