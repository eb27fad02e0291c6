//! Play queue with a cursor
//!
//! The queue owns the ordered tracks and the index of the selected one.
//! Every mutation keeps the cursor pointing at the same track when that track
//! survives, and the queue upholds one invariant:
//!
//! ```text
//! cursor == None  <=>  tracks.is_empty()
//! cursor == Some(i)  =>  i < tracks.len()
//! ```
//!
//! A queue that becomes non-empty without a selection selects its first
//! entry; nothing here talks to the transport.

use aria_core::Track;

/// Ordered tracks plus the selected position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue, selecting the first track if any
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let cursor = if tracks.is_empty() { None } else { Some(0) };
        Self { tracks, cursor }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Selected position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Selected track
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|i| self.tracks.get(i))
    }

    /// Index of the track with this id
    pub fn position(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.position(track_id).is_some()
    }

    /// Replace every track, selecting the first one
    pub fn replace(&mut self, tracks: Vec<Track>) {
        *self = Self::from_tracks(tracks);
    }

    /// Select the track by id, appending it first when absent
    ///
    /// Returns the new cursor.
    pub fn select_or_append(&mut self, track: Track) -> usize {
        let index = match self.position(&track.id) {
            Some(index) => index,
            None => {
                self.tracks.push(track);
                self.tracks.len() - 1
            }
        };
        self.cursor = Some(index);
        index
    }

    /// Move the cursor to `index`
    ///
    /// Returns `false` (and leaves the cursor alone) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Append if no track with the same id is queued
    ///
    /// Returns whether the track was added.
    pub fn append_if_absent(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
        true
    }

    /// Insert right after the cursor if no track with the same id is queued
    ///
    /// Returns the insertion index.
    pub fn insert_after_cursor(&mut self, track: Track) -> Option<usize> {
        if self.contains(&track.id) {
            return None;
        }
        let index = self.cursor.map_or(0, |c| c + 1);
        self.tracks.insert(index, track);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
        Some(index)
    }

    /// Remove the entry at `index`
    ///
    /// Entries before the cursor shift it down by one. Removing the selected
    /// entry keeps the cursor at the same position, clamped to the new last
    /// entry, or clears it when the queue is now empty.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }

        let removed = self.tracks.remove(index);
        let len = self.tracks.len();

        self.cursor = match self.cursor {
            _ if len == 0 => None,
            Some(cursor) if index < cursor => Some(cursor - 1),
            Some(cursor) if index == cursor => Some(cursor.min(len - 1)),
            other => other,
        };

        Some(removed)
    }

    /// Move the entry at `from` to `to`
    ///
    /// Returns `false` when either index is out of range.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if let Some(cursor) = self.cursor {
            self.cursor = Some(if cursor == from {
                to
            } else if from < cursor && cursor <= to {
                cursor - 1
            } else if to <= cursor && cursor < from {
                cursor + 1
            } else {
                cursor
            });
        }

        true
    }

    /// Index after the cursor, wrapping to 0 when `wrap` is set
    pub fn next_index(&self, wrap: bool) -> Option<usize> {
        let cursor = self.cursor?;
        let next = cursor + 1;
        if next < self.tracks.len() {
            Some(next)
        } else if wrap {
            Some(0)
        } else {
            None
        }
    }

    /// Index before the cursor, wrapping to the last entry
    pub fn previous_index(&self) -> Option<usize> {
        let cursor = self.cursor?;
        Some(if cursor == 0 {
            self.tracks.len() - 1
        } else {
            cursor - 1
        })
    }

    /// Remove every track
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }
}
