//! Track transformation engine — timelines, pitch remapping, merging, and
//! the named-track operations composed from them.
//!
//! Everything here works on the absolute timeline: a track's delta-encoded
//! events are materialized with [`to_absolute`], filtered/remapped/merged,
//! and re-encoded with [`to_deltas`]. Operations resolve tracks by name
//! and treat absent names as a normal outcome, never an error.

pub mod merge;
pub mod remap;
pub mod timeline;
pub mod track;

pub use merge::chronological;
pub use remap::NoteMap;
pub use timeline::{to_absolute, to_deltas, Timed};
pub use track::{
    copy_events_only, copy_notes_only, delete, ensure, merge_tracks, rename, MergeOutcome,
};
