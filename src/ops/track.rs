//! Primitive named-track mutations over a document.
//!
//! Every operation resolves tracks by name, prints one status line, and
//! degrades gracefully when a name is absent: missing optional parts are
//! the steady state for real charts, not an error. Results are computed in
//! full before anything is written back, so no operation can leave the
//! document half mutated.

use crate::chart::{Document, Track};

use super::merge::chronological;
use super::remap::NoteMap;
use super::timeline::{to_absolute, to_deltas, Timed};

/// How [`merge_tracks`] disposed of its target name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The merged track was appended under a previously unused name.
    Created,
    /// A track of that name existed and was replaced at its position.
    Replaced,
}

/// Index of the first track named `name`, creating an empty named track if
/// absent. Idempotent: repeated calls never create duplicates.
pub fn ensure(doc: &mut Document, name: &str) -> usize {
    match doc.find(name) {
        Some(idx) => idx,
        None => doc.push_track(Track::named(name)),
    }
}

/// Remove the first track named `name`.
pub fn delete(doc: &mut Document, name: &str) -> bool {
    match doc.find(name) {
        Some(idx) => {
            doc.remove_track(idx);
            println!("'{name}' deleted");
            true
        }
        None => {
            println!("'{name}' not found");
            false
        }
    }
}

/// Rename the first track named `old` in place.
pub fn rename(doc: &mut Document, old: &str, new: &str) -> bool {
    match doc.find(old) {
        Some(idx) => {
            doc.rename_track(idx, new);
            println!("'{old}' renamed to '{new}'");
            true
        }
        None => {
            println!("'{old}' not found");
            false
        }
    }
}

/// Append `source`'s non-note events (name events excluded) to `target`.
///
/// `target` is created if missing. An absent `source` leaves the freshly
/// ensured target as-is, a valid terminal outcome. Appended material
/// follows the target's current content time-wise; it is not interleaved.
pub fn copy_events_only(doc: &mut Document, source: &str, target: &str) {
    let target_idx = ensure(doc, target);
    let Some(source_idx) = doc.find(source) else {
        println!("'{source}' not found, '{target}' left as-is");
        return;
    };

    let kept: Vec<Timed> = to_absolute(doc.track(source_idx))
        .into_iter()
        .filter(|timed| !timed.kind.is_name() && !timed.kind.is_note())
        .collect();

    doc.append_events(target_idx, to_deltas(kept));
    println!("'{source}' events copied to '{target}'");
}

/// Append `source`'s notes to `target`, remapped through `map`.
///
/// Only note on/off events whose pitch is a key of `map` are retained;
/// each is expanded to its destinations (fan-out entries share the source
/// position). `target` is created if missing; an absent `source` leaves it
/// as-is.
pub fn copy_notes_only(doc: &mut Document, source: &str, target: &str, map: &NoteMap) {
    let target_idx = ensure(doc, target);
    let Some(source_idx) = doc.find(source) else {
        println!("'{source}' not found, '{target}' left as-is");
        return;
    };

    let mut remapped = Vec::new();
    for timed in to_absolute(doc.track(source_idx)) {
        if !timed.kind.is_note() {
            continue;
        }
        for kind in map.remap(&timed.kind) {
            remapped.push(Timed { at: timed.at, kind });
        }
    }

    doc.append_events(target_idx, to_deltas(remapped));
    println!("'{source}' notes copied to '{target}'");
}

/// Merge the named `sources`, in order, into a track named `merged`.
///
/// Absent sources contribute nothing; with no source present the merged
/// track holds only its name event. Source name events are excluded. At
/// equal ticks, earlier-listed sources sort first.
///
/// If a track named `merged` already exists it is replaced at its position
/// and its old content dropped. Sources are gathered before the
/// replacement, so the old track may itself appear in `sources`.
pub fn merge_tracks(doc: &mut Document, sources: &[&str], merged: &str) -> MergeOutcome {
    let mut timelines = Vec::with_capacity(sources.len());
    let mut present = Vec::with_capacity(sources.len());
    for &source in sources {
        if let Some(idx) = doc.find(source) {
            let timeline: Vec<Timed> = to_absolute(doc.track(idx))
                .into_iter()
                .filter(|timed| !timed.kind.is_name())
                .collect();
            timelines.push(timeline);
            present.push(source);
        }
    }

    let mut track = Track::named(merged);
    track.events.extend(to_deltas(chronological(timelines)));

    let outcome = match doc.find(merged) {
        Some(idx) => {
            doc.remove_track(idx);
            doc.insert_track(idx, track);
            MergeOutcome::Replaced
        }
        None => {
            doc.push_track(track);
            MergeOutcome::Created
        }
    };

    if present.is_empty() {
        println!("No sources to merge; created empty '{merged}'");
    } else {
        let joined = present
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(" + ");
        let note = match outcome {
            MergeOutcome::Replaced => " (replaced previous)",
            MergeOutcome::Created => "",
        };
        println!("Merged {joined} into '{merged}'{note}");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Event, EventKind, MetaEvent, OtherEvent};
    use midly::{Format, Header, Timing};

    fn doc() -> Document {
        Document::new(Header::new(Format::Parallel, Timing::Metrical(480.into())))
    }

    fn text_event(delta: u32, text: &[u8]) -> Event {
        Event {
            delta,
            kind: EventKind::Other(OtherEvent::Meta(MetaEvent::Text(text.to_vec()))),
        }
    }

    fn deltas(track: &Track) -> Vec<u32> {
        track.events.iter().map(|ev| ev.delta).collect()
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut doc = doc();
        let first = ensure(&mut doc, "TRIGGERS");
        let second = ensure(&mut doc, "TRIGGERS");

        assert_eq!(first, second);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.track(first).name(), Some("TRIGGERS"));
    }

    #[test]
    fn delete_removes_only_first_of_duplicates() {
        let mut doc = doc();
        let mut first = Track::named("X");
        first.events.push(Event::note_on(1, 0, 60, 64));
        doc.push_track(first);
        doc.push_track(Track::named("X"));

        assert!(delete(&mut doc, "X"));
        assert_eq!(doc.len(), 1);
        // The survivor is the formerly-second, empty one.
        assert_eq!(doc.track(0).events.len(), 1);
        assert!(doc.find("X").is_some());
    }

    #[test]
    fn delete_absent_is_non_fatal() {
        let mut doc = doc();
        doc.push_track(Track::named("KEEP"));

        assert!(!delete(&mut doc, "GONE"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn rename_absent_leaves_document_unchanged() {
        let mut doc = doc();
        doc.push_track(Track::named("A"));

        assert!(!rename(&mut doc, "MISSING", "B"));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.track(0).name(), Some("A"));
    }

    #[test]
    fn rename_rewrites_in_place() {
        let mut doc = doc();
        doc.push_track(Track::named("EVENTS FORMAT"));

        assert!(rename(&mut doc, "EVENTS FORMAT", "EVENTS"));
        assert_eq!(doc.find("EVENTS"), Some(0));
        assert_eq!(doc.find("EVENTS FORMAT"), None);
    }

    #[test]
    fn copy_events_only_skips_names_and_notes() {
        let mut doc = doc();
        let mut source = Track::named("SRC");
        source.events.push(text_event(10, b"[verse]"));
        source.events.push(Event::note_on(5, 0, 96, 100));
        source.events.push(text_event(5, b"[chorus]"));
        source.events.push(Event::note_off(3, 0, 96, 0));
        doc.push_track(source);

        copy_events_only(&mut doc, "SRC", "DST");

        let dst = doc.find("DST").unwrap();
        let events = &doc.track(dst).events;
        // Name + the two text events, re-encoded at absolute 10 and 20.
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], text_event(10, b"[verse]"));
        assert_eq!(events[2], text_event(10, b"[chorus]"));
    }

    #[test]
    fn copy_events_only_absent_source_leaves_target_empty() {
        let mut doc = doc();
        copy_events_only(&mut doc, "NOWHERE", "DST");

        let dst = doc.find("DST").unwrap();
        assert_eq!(doc.track(dst).events.len(), 1);
        assert!(doc.track(dst).events[0].kind.is_name());
    }

    #[test]
    fn copy_events_only_appends_after_existing_content() {
        let mut doc = doc();
        let mut target = Track::named("DST");
        target.events.push(text_event(100, b"old"));
        doc.push_track(target);

        let mut source = Track::named("SRC");
        source.events.push(text_event(10, b"new"));
        doc.push_track(source);

        copy_events_only(&mut doc, "SRC", "DST");

        let dst = doc.find("DST").unwrap();
        assert_eq!(deltas(doc.track(dst)), vec![0, 100, 10]);
    }

    #[test]
    fn copy_notes_identity_map_preserves_timing_and_payload() {
        let mut doc = doc();
        let mut source = Track::named("SRC");
        source.events.push(Event::note_on(10, 0, 60, 100));
        source.events.push(Event::note_off(5, 0, 60, 0));
        doc.push_track(source);

        copy_notes_only(&mut doc, "SRC", "DST", &NoteMap::new().route(60, 60));

        let dst = doc.find("DST").unwrap();
        let events = &doc.track(dst).events;
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], Event::note_on(10, 0, 60, 100));
        assert_eq!(events[2], Event::note_off(5, 0, 60, 0));
    }

    #[test]
    fn copy_notes_fan_out_encodes_zero_deltas() {
        let mut doc = doc();
        let mut source = Track::named("SRC");
        source.events.push(Event::note_on(20, 0, 100, 127));
        doc.push_track(source);

        copy_notes_only(
            &mut doc,
            "SRC",
            "DST",
            &NoteMap::new().fan_out(100, &[67, 79, 91]),
        );

        let dst = doc.find("DST").unwrap();
        let events = &doc.track(dst).events;
        assert_eq!(deltas(doc.track(dst)), vec![0, 20, 0, 0]);
        let keys: Vec<u8> = events[1..]
            .iter()
            .filter_map(|ev| ev.kind.note_key())
            .collect();
        assert_eq!(keys, vec![67, 79, 91]);
    }

    #[test]
    fn copy_notes_drops_unmapped_pitches() {
        let mut doc = doc();
        let mut source = Track::named("SRC");
        source.events.push(Event::note_on(10, 0, 60, 100));
        source.events.push(Event::note_on(10, 0, 61, 100));
        doc.push_track(source);

        copy_notes_only(&mut doc, "SRC", "DST", &NoteMap::new().route(61, 50));

        let dst = doc.find("DST").unwrap();
        let events = &doc.track(dst).events;
        assert_eq!(events.len(), 2);
        // The surviving note keeps its absolute position (10 + 10).
        assert_eq!(events[1], Event::note_on(20, 0, 50, 100));
    }

    #[test]
    fn merge_orders_by_absolute_time() {
        let mut doc = doc();
        let mut a = Track::named("A");
        a.events.push(Event::note_on(50, 0, 1, 100));
        doc.push_track(a);
        let mut b = Track::named("B");
        b.events.push(Event::note_on(30, 0, 2, 100));
        doc.push_track(b);

        let outcome = merge_tracks(&mut doc, &["A", "B"], "M");
        assert_eq!(outcome, MergeOutcome::Created);

        let merged = doc.find("M").unwrap();
        let events = &doc.track(merged).events;
        assert_eq!(deltas(doc.track(merged)), vec![0, 30, 20]);
        assert_eq!(events[1].kind.note_key(), Some(2));
        assert_eq!(events[2].kind.note_key(), Some(1));
    }

    #[test]
    fn merge_with_one_absent_source_re_encodes_the_other() {
        let mut doc = doc();
        let mut b = Track::named("B");
        b.events.push(Event::note_on(30, 0, 2, 100));
        b.events.push(Event::note_off(10, 0, 2, 0));
        doc.push_track(b);

        merge_tracks(&mut doc, &["A", "B"], "M");

        let merged = doc.find("M").unwrap();
        let events = &doc.track(merged).events;
        // B's name event is excluded; notes arrive re-encoded under M's name.
        assert_eq!(events.len(), 3);
        assert!(events[0].kind.is_name());
        assert_eq!(deltas(doc.track(merged)), vec![0, 30, 10]);
    }

    #[test]
    fn merge_with_no_sources_creates_name_only_track() {
        let mut doc = doc();
        let outcome = merge_tracks(&mut doc, &["A", "B"], "M");

        assert_eq!(outcome, MergeOutcome::Created);
        let merged = doc.find("M").unwrap();
        assert_eq!(doc.track(merged).events.len(), 1);
        assert_eq!(doc.track(merged).name(), Some("M"));
    }

    #[test]
    fn merge_ties_keep_earlier_source_first() {
        let mut doc = doc();
        let mut a = Track::named("A");
        a.events.push(Event::note_on(10, 0, 1, 100));
        doc.push_track(a);
        let mut b = Track::named("B");
        b.events.push(Event::note_on(10, 0, 2, 100));
        doc.push_track(b);

        merge_tracks(&mut doc, &["A", "B"], "M");

        let merged = doc.find("M").unwrap();
        let keys: Vec<u8> = doc.track(merged).events[1..]
            .iter()
            .filter_map(|ev| ev.kind.note_key())
            .collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn merge_replaces_existing_target_in_place() {
        let mut doc = doc();
        let mut old = Track::named("M");
        old.events.push(Event::note_on(99, 0, 9, 9));
        doc.push_track(old);
        doc.push_track(Track::named("AFTER"));
        let mut a = Track::named("A");
        a.events.push(Event::note_on(5, 0, 1, 100));
        doc.push_track(a);

        let outcome = merge_tracks(&mut doc, &["A"], "M");
        assert_eq!(outcome, MergeOutcome::Replaced);

        // Position preserved, old content gone, no duplicate created.
        assert_eq!(doc.find("M"), Some(0));
        assert_eq!(doc.find("AFTER"), Some(1));
        let events = &doc.track(0).events;
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], Event::note_on(5, 0, 1, 100));
    }

    #[test]
    fn merge_target_may_be_its_own_source() {
        let mut doc = doc();
        let mut m = Track::named("M");
        m.events.push(Event::note_on(10, 0, 1, 100));
        doc.push_track(m);
        let mut b = Track::named("B");
        b.events.push(Event::note_on(5, 0, 2, 100));
        doc.push_track(b);

        merge_tracks(&mut doc, &["M", "B"], "M");

        let m_idx = doc.find("M").unwrap();
        let events = &doc.track(m_idx).events;
        let keys: Vec<u8> = events[1..]
            .iter()
            .filter_map(|ev| ev.kind.note_key())
            .collect();
        assert_eq!(keys, vec![2, 1]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn merge_keeps_non_note_events_of_sources() {
        let mut doc = doc();
        let mut a = Track::named("A");
        a.events.push(text_event(15, b"[solo]"));
        doc.push_track(a);
        let mut b = Track::named("B");
        b.events.push(Event::note_on(10, 0, 2, 100));
        doc.push_track(b);

        merge_tracks(&mut doc, &["A", "B"], "M");

        let merged = doc.find("M").unwrap();
        let events = &doc.track(merged).events;
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], Event::note_on(10, 0, 2, 100));
        assert_eq!(events[2], text_event(5, b"[solo]"));
    }
}
