mod media;
mod track;

pub use media::{
    select_variant, MediaVariant, PREFERRED_ARTWORK_QUALITY, PREFERRED_STREAM_QUALITY,
};
pub use track::{Track, TrackId};
