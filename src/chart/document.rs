//! Document and track model with index-backed name lookup.

use midly::Header;

use super::event::{Event, EventKind};
use super::index::TrackIndex;

/// An ordered sequence of delta-encoded events.
///
/// The name is not a stored field: it is derived from the first
/// [`EventKind::TrackName`] event found scanning in order, by convention
/// the first event at delta 0. Tracks without a name event (conductor
/// tracks and the like) are valid and simply unaddressable by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub events: Vec<Event>,
}

impl Track {
    /// A fresh track holding exactly one name event at delta 0.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            events: vec![Event::name(0, name)],
        }
    }

    /// The first name payload found scanning in order, if any.
    pub fn name(&self) -> Option<&str> {
        self.events.iter().find_map(|ev| match &ev.kind {
            EventKind::TrackName(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// A whole chart: the container header plus an ordered set of tracks.
/// Exclusively owned by one conversion run.
///
/// All structural mutation goes through methods so the name index can never
/// drift out of sync with the track list.
#[derive(Debug, Clone)]
pub struct Document {
    header: Header,
    tracks: Vec<Track>,
    index: TrackIndex,
}

impl Document {
    /// An empty document with the given container header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            tracks: Vec::new(),
            index: TrackIndex::new(),
        }
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, idx: usize) -> &Track {
        &self.tracks[idx]
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the first track named `name`, by document order.
    ///
    /// Absence is a normal outcome: charts simply lack optional parts.
    pub fn find(&mut self, name: &str) -> Option<usize> {
        self.index.lookup(&self.tracks, name)
    }

    /// Append a track, returning its index.
    pub fn push_track(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.index.invalidate();
        self.tracks.len() - 1
    }

    /// Insert a track at `idx`, shifting later tracks.
    pub fn insert_track(&mut self, idx: usize, track: Track) {
        self.tracks.insert(idx, track);
        self.index.invalidate();
    }

    /// Remove and return the track at `idx`.
    pub fn remove_track(&mut self, idx: usize) -> Track {
        let track = self.tracks.remove(idx);
        self.index.invalidate();
        track
    }

    /// Rewrite the name payload of the track at `idx` in place.
    ///
    /// A track without a name event is left unchanged.
    pub fn rename_track(&mut self, idx: usize, new_name: &str) {
        let slot = self.tracks[idx].events.iter_mut().find_map(|ev| match &mut ev.kind {
            EventKind::TrackName(name) => Some(name),
            _ => None,
        });
        if let Some(name) = slot {
            *name = new_name.to_string();
            self.index.invalidate();
        }
    }

    /// Append events to the track at `idx`.
    pub fn append_events(&mut self, idx: usize, events: impl IntoIterator<Item = Event>) {
        let track = &mut self.tracks[idx];
        let before = track.events.len();
        track.events.extend(events);
        // Appended material normally carries no name event, but if one
        // slips in it can change an unnamed track's identity.
        if track.events[before..].iter().any(|ev| ev.kind.is_name()) {
            self.index.invalidate();
        }
    }
}
