//! Delta/absolute time reconciliation.
//!
//! Tracks store delta-encoded events; every transformation works on the
//! absolute timeline instead and re-encodes at the end. The two directions
//! are exact inverses: `to_deltas(to_absolute(t))` reproduces `t`'s deltas
//! and payloads.

use crate::chart::{Event, EventKind, Track};

/// An event kind pinned to an absolute tick position.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed {
    /// Ticks from track start.
    pub at: u64,
    pub kind: EventKind,
}

/// Materialize a track's absolute timeline.
///
/// `at[i]` is the sum of deltas through event `i`; relative order is kept.
pub fn to_absolute(track: &Track) -> Vec<Timed> {
    let mut at = 0u64;
    track
        .events
        .iter()
        .map(|ev| {
            at += u64::from(ev.delta);
            Timed {
                at,
                kind: ev.kind.clone(),
            }
        })
        .collect()
}

/// Re-encode an absolute timeline as delta events.
///
/// The input must be sorted non-decreasing by `at`. Duplicate positions
/// encode as delta 0 (simultaneous events, fan-out), and relative order
/// among equal positions is preserved.
pub fn to_deltas(timeline: Vec<Timed>) -> Vec<Event> {
    let mut prev = 0u64;
    timeline
        .into_iter()
        .map(|timed| {
            let delta = (timed.at - prev) as u32;
            prev = timed.at;
            Event {
                delta,
                kind: timed.kind,
            }
        })
        .collect()
}
