//! Normalization of catalog payloads into domain types
//!
//! The API is loose about shapes: artists arrive as a preformatted line or as
//! a list of credits, images and streams as a bare URL or a list of quality
//! variants, numbers as numbers or strings. Everything past this module sees
//! only [`Track`], [`ArtistSummary`] and [`AlbumSummary`].

use aria_core::{MediaVariant, Track};

use crate::types::{
    AlbumSummary, ArtistField, ArtistGroups, ArtistSummary, LooseNumber, MediaField, WireAlbum,
    WireArtist, WireSong,
};

/// Shown when a payload carries no usable artist credit
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

pub(crate) fn track(song: WireSong) -> Track {
    let artist = artist_line(song.primary_artists.as_ref(), song.artists.as_ref());
    let duration = song.duration.as_ref().and_then(whole_number).unwrap_or(0);

    Track::new(song.id, song.name)
        .with_artist(artist)
        .with_duration_seconds(duration)
        .with_artwork(variants(song.image))
        .with_streams(variants(song.download_url))
}

pub(crate) fn artist(artist: WireArtist) -> ArtistSummary {
    ArtistSummary {
        id: artist.id,
        name: artist.name,
        role: artist.role.filter(|r| !r.is_empty()),
        artwork: variants(artist.image),
    }
}

pub(crate) fn album(album: WireAlbum) -> AlbumSummary {
    AlbumSummary {
        artist_display_name: artist_line(album.primary_artists.as_ref(), album.artists.as_ref()),
        year: album.year.as_ref().and_then(text),
        song_count: album.song_count.as_ref().and_then(whole_number),
        artwork: variants(album.image),
        id: album.id,
        name: album.name,
    }
}

/// Artist line: the preformatted field, else credited names joined with ", "
fn artist_line(primary: Option<&ArtistField>, groups: Option<&ArtistGroups>) -> String {
    let from_primary = match primary {
        Some(ArtistField::Line(line)) => non_empty(line.trim()).map(str::to_string),
        Some(ArtistField::Credits(credits)) => join_names(credits.iter().map(|c| c.name.as_str())),
        None => None,
    };

    from_primary
        .or_else(|| groups.and_then(|g| join_names(g.primary.iter().map(|c| c.name.as_str()))))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let names: Vec<&str> = names.map(str::trim).filter(|n| !n.is_empty()).collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Media variants in server order; a bare URL becomes a single untagged variant
fn variants(field: Option<MediaField>) -> Vec<MediaVariant> {
    match field {
        Some(MediaField::Url(url)) if !url.is_empty() => vec![MediaVariant::new("", url)],
        Some(MediaField::Variants(list)) => list
            .into_iter()
            .filter(|v| !v.url.is_empty())
            .map(|v| MediaVariant::new(v.quality, v.url))
            .collect(),
        _ => Vec::new(),
    }
}

fn whole_number(value: &LooseNumber) -> Option<u32> {
    let number = match value {
        LooseNumber::Number(n) => *n,
        LooseNumber::Text(s) => s.trim().parse::<f64>().ok()?,
    };

    if number.is_finite() && number >= 0.0 {
        Some(number.min(f64::from(u32::MAX)) as u32)
    } else {
        None
    }
}

fn text(value: &LooseNumber) -> Option<String> {
    match value {
        LooseNumber::Number(n) => Some(format!("{}", n.trunc())),
        LooseNumber::Text(s) => non_empty(s.trim()).map(str::to_string),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
