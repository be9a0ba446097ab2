//! Event data model — the fundamental unit of chart information.
//!
//! Events keep the container's delta-time encoding: each one stores the
//! tick distance to its predecessor in the same track. The engine only
//! interprets track names and note on/off; everything else travels through
//! [`OtherEvent`] untouched so it can be re-emitted faithfully on save.

use midly::{MidiMessage, SmpteTime};

/// A single delta-encoded track event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Ticks since the previous event in the same track.
    pub delta: u32,
    pub kind: EventKind,
}

/// What an event carries.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Track-name meta payload. By convention the first event of a track.
    TrackName(String),
    /// Note start. A velocity-0 NoteOn stays a NoteOn, exactly as parsed.
    NoteOn { channel: u8, key: u8, vel: u8 },
    /// Note end.
    NoteOff { channel: u8, key: u8, vel: u8 },
    /// Anything the engine does not interpret.
    Other(OtherEvent),
}

/// Uninterpreted payloads, owned so a document outlives its parse buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum OtherEvent {
    /// Channel-voice messages other than note on/off.
    Channel { channel: u8, message: MidiMessage },
    SysEx(Vec<u8>),
    Escape(Vec<u8>),
    Meta(MetaEvent),
}

/// Owned mirror of the container's meta messages, minus the two the engine
/// handles itself (track name, end-of-track).
#[derive(Debug, Clone, PartialEq)]
pub enum MetaEvent {
    TrackNumber(Option<u16>),
    Text(Vec<u8>),
    Copyright(Vec<u8>),
    InstrumentName(Vec<u8>),
    Lyric(Vec<u8>),
    Marker(Vec<u8>),
    CuePoint(Vec<u8>),
    ProgramName(Vec<u8>),
    DeviceName(Vec<u8>),
    MidiChannel(u8),
    MidiPort(u8),
    Tempo(u32),
    SmpteOffset(SmpteTime),
    TimeSignature(u8, u8, u8, u8),
    KeySignature(i8, bool),
    SequencerSpecific(Vec<u8>),
    Unknown(u8, Vec<u8>),
}

impl Event {
    /// A track-name event at the given delta.
    pub fn name(delta: u32, name: impl Into<String>) -> Self {
        Self {
            delta,
            kind: EventKind::TrackName(name.into()),
        }
    }

    /// A note-on event.
    pub fn note_on(delta: u32, channel: u8, key: u8, vel: u8) -> Self {
        Self {
            delta,
            kind: EventKind::NoteOn { channel, key, vel },
        }
    }

    /// A note-off event.
    pub fn note_off(delta: u32, channel: u8, key: u8, vel: u8) -> Self {
        Self {
            delta,
            kind: EventKind::NoteOff { channel, key, vel },
        }
    }
}

impl EventKind {
    /// Whether this is a track-name event.
    pub fn is_name(&self) -> bool {
        matches!(self, EventKind::TrackName(_))
    }

    /// Whether this is a note on/off event.
    pub fn is_note(&self) -> bool {
        matches!(self, EventKind::NoteOn { .. } | EventKind::NoteOff { .. })
    }

    /// The pitch of a note on/off event, `None` for any other kind.
    pub fn note_key(&self) -> Option<u8> {
        match self {
            EventKind::NoteOn { key, .. } | EventKind::NoteOff { key, .. } => Some(*key),
            _ => None,
        }
    }
}
