//! The fixed conversion script.
//!
//! Pure orchestration over the track operations: rebuild each instrument
//! part through remap slices, assemble the band and trigger tracks, and
//! prune the parts the selected layout does not use. One [`Pipeline`] run
//! transforms one document in place; intermediates are created, consumed,
//! and deleted within the run.

pub mod maps;
pub mod options;

pub use options::{BandMelody, ChartLayout, ConvertOptions, PracticeClick};

use crate::chart::Document;
use crate::ops::{copy_events_only, copy_notes_only, delete, merge_tracks, rename};

use maps::{
    band_bass_map, band_drum_map, big_note_map, ghl_fret_map, instrument_map, trigger_drum_map,
    trigger_keyframe_map,
};

/// The conversion script, parameterized by the three option switches.
pub struct Pipeline {
    options: ConvertOptions,
}

impl Pipeline {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Transform one document in place.
    pub fn run(&self, doc: &mut Document) {
        self.rebuild_part(doc, "PART GUITAR", true);
        self.rebuild_part(doc, "PART BASS", false);
        self.rebuild_part(doc, "PART GUITAR COOP", false);
        self.rebuild_part(doc, "PART RHYTHM", false);
        self.band_bass(doc);
        self.band_drums(doc);
        self.band_melody(doc);
        self.rebuild_events(doc);
        self.triggers(doc);
        self.prune_layout(doc);
    }

    /// Rebuild one instrument part under its own name: non-note events,
    /// five-lane notes, the six-fret sibling's translated notes, and (for
    /// the lead part) the big note lifted from keys.
    ///
    /// Merge order fixes the tie-break at equal ticks: events, then fret
    /// translations, then the big note, then the part's own lanes.
    fn rebuild_part(&self, doc: &mut Document, part: &str, with_big_note: bool) {
        let events = format!("{part} EVENTS");
        let notes = format!("{part} NOTES");
        let frets = format!("{part} FRETS");
        let big = format!("{part} BIG");
        let ghl = format!("{part} GHL");

        copy_events_only(doc, part, &events);
        copy_notes_only(doc, part, &notes, &instrument_map());
        copy_notes_only(doc, &ghl, &frets, &ghl_fret_map());

        let mut sources = vec![events.as_str(), frets.as_str()];
        if with_big_note {
            copy_notes_only(doc, "PART KEYS", &big, &big_note_map());
            sources.push(big.as_str());
        }
        sources.push(notes.as_str());

        merge_tracks(doc, &sources, part);

        delete(doc, &events);
        delete(doc, &notes);
        delete(doc, &frets);
        if with_big_note {
            delete(doc, &big);
        }
        delete(doc, &ghl);
    }

    fn band_bass(&self, doc: &mut Document) {
        copy_events_only(doc, "PART BASS", "BAND BASS EVENTS");
        copy_notes_only(doc, "PART BASS", "BAND BASS NOTES", &band_bass_map());
        merge_tracks(doc, &["BAND BASS EVENTS", "BAND BASS NOTES"], "BAND BASS");
        delete(doc, "BAND BASS EVENTS");
        delete(doc, "BAND BASS NOTES");
    }

    fn band_drums(&self, doc: &mut Document) {
        copy_events_only(doc, "PART DRUMS", "BAND DRUMS EVENTS");
        copy_notes_only(doc, "PART DRUMS", "BAND DRUMS NOTES", &band_drum_map());
        merge_tracks(doc, &["BAND DRUMS EVENTS", "BAND DRUMS NOTES"], "BAND DRUMS");
        delete(doc, "BAND DRUMS EVENTS");
        delete(doc, "BAND DRUMS NOTES");
    }

    fn band_melody(&self, doc: &mut Document) {
        let target = match self.options.band_melody {
            BandMelody::Singer => "BAND SINGER",
            BandMelody::Keys => "BAND KEYS",
        };
        copy_events_only(doc, "PART KEYS", target);
    }

    /// Strip stray notes from the global events track.
    fn rebuild_events(&self, doc: &mut Document) {
        copy_events_only(doc, "EVENTS", "EVENTS FORMAT");
        delete(doc, "EVENTS");
        rename(doc, "EVENTS FORMAT", "EVENTS");
    }

    fn triggers(&self, doc: &mut Document) {
        match self.options.practice_click {
            PracticeClick::WithDrums => {
                copy_notes_only(
                    doc,
                    "PART KEYS",
                    "TRIGGER KEYFRAMES",
                    &trigger_keyframe_map(),
                );
                copy_notes_only(doc, "PART DRUMS", "TRIGGER DRUMS", &trigger_drum_map());
                merge_tracks(doc, &["TRIGGER KEYFRAMES", "TRIGGER DRUMS"], "TRIGGERS");
                delete(doc, "TRIGGER KEYFRAMES");
                delete(doc, "TRIGGER DRUMS");
            }
            PracticeClick::KeysOnly => {
                copy_notes_only(doc, "PART KEYS", "TRIGGERS", &trigger_keyframe_map());
            }
        }
        delete(doc, "PART DRUMS");
        delete(doc, "PART KEYS");
    }

    fn prune_layout(&self, doc: &mut Document) {
        match self.options.layout {
            ChartLayout::GuitarBass => {
                delete(doc, "PART GUITAR COOP");
                delete(doc, "PART RHYTHM");
            }
            ChartLayout::LeadRhythm => {
                delete(doc, "PART BASS");
            }
        }
    }
}
