//! Name→index lookup cache over a document's track list.
//!
//! Track names are not stored fields; they live inside name events. Rather
//! than rescanning every track per lookup, the index builds a name→index
//! map in one pass and rebuilds it lazily after structural mutation (track
//! add/remove/rename). For duplicate names the first track by document
//! order wins, matching lookup, delete, and rename semantics.

use std::collections::HashMap;

use super::document::Track;

#[derive(Debug, Clone)]
pub(crate) struct TrackIndex {
    map: HashMap<String, usize>,
    stale: bool,
}

impl TrackIndex {
    pub(crate) fn new() -> Self {
        Self {
            map: HashMap::new(),
            stale: true,
        }
    }

    /// Mark the map as out of date. Cheap; the rebuild happens on the next
    /// lookup.
    pub(crate) fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Index of the first track named `name`, if any.
    pub(crate) fn lookup(&mut self, tracks: &[Track], name: &str) -> Option<usize> {
        if self.stale {
            self.rebuild(tracks);
        }
        self.map.get(name).copied()
    }

    fn rebuild(&mut self, tracks: &[Track]) {
        self.map.clear();
        for (idx, track) in tracks.iter().enumerate() {
            if let Some(name) = track.name() {
                self.map.entry(name.to_string()).or_insert(idx);
            }
        }
        self.stale = false;
    }
}
