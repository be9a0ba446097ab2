//! Container adapter — documents in and out of the `midly` SMF codec.
//!
//! `midly` owns all wire encoding; this module only converts between its
//! zero-copy parse tree and the crate's owned event model. End-of-track
//! markers are structural: they are stripped on load (their delta folded
//! into the next event, so absolute times survive) and re-appended at
//! delta 0 on save. Track-name bytes decode as lossy UTF-8.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, TrackEvent, TrackEventKind};

use super::document::{Document, Track};
use super::event::{Event, EventKind, MetaEvent, OtherEvent};

/// Failure loading or saving one chart file. Fatal for that file only;
/// the batch loop reports it and moves on.
#[derive(Debug)]
pub enum ChartError {
    Io(io::Error),
    Midi(midly::Error),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::Io(err) => write!(f, "i/o error: {err}"),
            ChartError::Midi(err) => write!(f, "malformed chart: {err}"),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<io::Error> for ChartError {
    fn from(err: io::Error) -> Self {
        ChartError::Io(err)
    }
}

impl From<midly::Error> for ChartError {
    fn from(err: midly::Error) -> Self {
        ChartError::Midi(err)
    }
}

/// Load a chart document from an SMF file.
pub fn load(path: &Path) -> Result<Document, ChartError> {
    let bytes = fs::read(path)?;
    let smf = Smf::parse(&bytes)?;
    Ok(document_from_smf(&smf))
}

/// Save a chart document as an SMF file. One write per output.
pub fn save(doc: &Document, path: &Path) -> Result<(), ChartError> {
    let smf = smf_from_document(doc);
    smf.save(path)?;
    Ok(())
}

fn document_from_smf(smf: &Smf) -> Document {
    let mut doc = Document::new(smf.header);
    for events in &smf.tracks {
        let mut track = Track::default();
        // Delta carried over from stripped structural events.
        let mut carry = 0u32;
        for ev in events {
            let delta = carry + ev.delta.as_int();
            match convert_kind(&ev.kind) {
                Some(kind) => {
                    track.events.push(Event { delta, kind });
                    carry = 0;
                }
                None => carry = delta,
            }
        }
        doc.push_track(track);
    }
    doc
}

/// Map one container event into the owned model. `None` for end-of-track.
fn convert_kind(kind: &TrackEventKind) -> Option<EventKind> {
    let converted = match kind {
        TrackEventKind::Midi { channel, message } => match message {
            MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                channel: channel.as_int(),
                key: key.as_int(),
                vel: vel.as_int(),
            },
            MidiMessage::NoteOff { key, vel } => EventKind::NoteOff {
                channel: channel.as_int(),
                key: key.as_int(),
                vel: vel.as_int(),
            },
            other => EventKind::Other(OtherEvent::Channel {
                channel: channel.as_int(),
                message: *other,
            }),
        },
        TrackEventKind::SysEx(data) => EventKind::Other(OtherEvent::SysEx(data.to_vec())),
        TrackEventKind::Escape(data) => EventKind::Other(OtherEvent::Escape(data.to_vec())),
        TrackEventKind::Meta(meta) => {
            let meta = match meta {
                MetaMessage::TrackName(name) => {
                    return Some(EventKind::TrackName(
                        String::from_utf8_lossy(name).into_owned(),
                    ))
                }
                MetaMessage::EndOfTrack => return None,
                MetaMessage::TrackNumber(n) => MetaEvent::TrackNumber(*n),
                MetaMessage::Text(b) => MetaEvent::Text(b.to_vec()),
                MetaMessage::Copyright(b) => MetaEvent::Copyright(b.to_vec()),
                MetaMessage::InstrumentName(b) => MetaEvent::InstrumentName(b.to_vec()),
                MetaMessage::Lyric(b) => MetaEvent::Lyric(b.to_vec()),
                MetaMessage::Marker(b) => MetaEvent::Marker(b.to_vec()),
                MetaMessage::CuePoint(b) => MetaEvent::CuePoint(b.to_vec()),
                MetaMessage::ProgramName(b) => MetaEvent::ProgramName(b.to_vec()),
                MetaMessage::DeviceName(b) => MetaEvent::DeviceName(b.to_vec()),
                MetaMessage::MidiChannel(ch) => MetaEvent::MidiChannel(ch.as_int()),
                MetaMessage::MidiPort(port) => MetaEvent::MidiPort(port.as_int()),
                MetaMessage::Tempo(t) => MetaEvent::Tempo(t.as_int()),
                MetaMessage::SmpteOffset(time) => MetaEvent::SmpteOffset(*time),
                MetaMessage::TimeSignature(n, d, c, b) => {
                    MetaEvent::TimeSignature(*n, *d, *c, *b)
                }
                MetaMessage::KeySignature(sharps, minor) => {
                    MetaEvent::KeySignature(*sharps, *minor)
                }
                MetaMessage::SequencerSpecific(b) => MetaEvent::SequencerSpecific(b.to_vec()),
                MetaMessage::Unknown(code, b) => MetaEvent::Unknown(*code, b.to_vec()),
            };
            EventKind::Other(OtherEvent::Meta(meta))
        }
    };
    Some(converted)
}

fn smf_from_document(doc: &Document) -> Smf<'_> {
    let mut smf = Smf::new(doc.header());
    for track in doc.tracks() {
        let mut events = Vec::with_capacity(track.events.len() + 1);
        for ev in &track.events {
            events.push(TrackEvent {
                delta: ev.delta.into(),
                kind: kind_to_midly(&ev.kind),
            });
        }
        events.push(TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(events);
    }
    smf
}

fn kind_to_midly(kind: &EventKind) -> TrackEventKind<'_> {
    match kind {
        EventKind::TrackName(name) => {
            TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes()))
        }
        EventKind::NoteOn { channel, key, vel } => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: MidiMessage::NoteOn {
                key: (*key).into(),
                vel: (*vel).into(),
            },
        },
        EventKind::NoteOff { channel, key, vel } => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: MidiMessage::NoteOff {
                key: (*key).into(),
                vel: (*vel).into(),
            },
        },
        EventKind::Other(OtherEvent::Channel { channel, message }) => TrackEventKind::Midi {
            channel: (*channel).into(),
            message: *message,
        },
        EventKind::Other(OtherEvent::SysEx(data)) => TrackEventKind::SysEx(data),
        EventKind::Other(OtherEvent::Escape(data)) => TrackEventKind::Escape(data),
        EventKind::Other(OtherEvent::Meta(meta)) => TrackEventKind::Meta(meta_to_midly(meta)),
    }
}

fn meta_to_midly(meta: &MetaEvent) -> MetaMessage<'_> {
    match meta {
        MetaEvent::TrackNumber(n) => MetaMessage::TrackNumber(*n),
        MetaEvent::Text(b) => MetaMessage::Text(b),
        MetaEvent::Copyright(b) => MetaMessage::Copyright(b),
        MetaEvent::InstrumentName(b) => MetaMessage::InstrumentName(b),
        MetaEvent::Lyric(b) => MetaMessage::Lyric(b),
        MetaEvent::Marker(b) => MetaMessage::Marker(b),
        MetaEvent::CuePoint(b) => MetaMessage::CuePoint(b),
        MetaEvent::ProgramName(b) => MetaMessage::ProgramName(b),
        MetaEvent::DeviceName(b) => MetaMessage::DeviceName(b),
        MetaEvent::MidiChannel(ch) => MetaMessage::MidiChannel((*ch).into()),
        MetaEvent::MidiPort(port) => MetaMessage::MidiPort((*port).into()),
        MetaEvent::Tempo(t) => MetaMessage::Tempo((*t).into()),
        MetaEvent::SmpteOffset(time) => MetaMessage::SmpteOffset(*time),
        MetaEvent::TimeSignature(n, d, c, b) => MetaMessage::TimeSignature(*n, *d, *c, *b),
        MetaEvent::KeySignature(sharps, minor) => MetaMessage::KeySignature(*sharps, *minor),
        MetaEvent::SequencerSpecific(b) => MetaMessage::SequencerSpecific(b),
        MetaEvent::Unknown(code, b) => MetaMessage::Unknown(*code, b),
    }
}
