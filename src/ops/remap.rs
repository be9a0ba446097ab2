//! Pitch remapping with one-to-many fan-out.

use std::collections::HashMap;

use crate::chart::EventKind;

/// A table from source pitch to one or more destination pitches.
///
/// Destination order matters: a fan-out entry emits one event per target in
/// list order, all sharing the source event's position, which downstream
/// delta encoding turns into a real delta followed by zeros.
#[derive(Debug, Clone, Default)]
pub struct NoteMap {
    targets: HashMap<u8, Vec<u8>>,
}

impl NoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `src` to a single destination pitch.
    pub fn route(mut self, src: u8, dst: u8) -> Self {
        self.targets.insert(src, vec![dst]);
        self
    }

    /// Map `src` to several simultaneous destination pitches.
    pub fn fan_out(mut self, src: u8, dsts: &[u8]) -> Self {
        self.targets.insert(src, dsts.to_vec());
        self
    }

    /// Whether `pitch` is a source key of this table.
    pub fn contains(&self, pitch: u8) -> bool {
        self.targets.contains_key(&pitch)
    }

    /// Expand one note event into its mapped destinations, in table order.
    ///
    /// Kind, channel, and velocity are preserved; only the pitch changes.
    /// Non-note kinds and unmapped pitches expand to nothing.
    pub fn remap(&self, kind: &EventKind) -> Vec<EventKind> {
        let (key, vel, channel, on) = match kind {
            EventKind::NoteOn { channel, key, vel } => (*key, *vel, *channel, true),
            EventKind::NoteOff { channel, key, vel } => (*key, *vel, *channel, false),
            _ => return Vec::new(),
        };
        let Some(dsts) = self.targets.get(&key) else {
            return Vec::new();
        };
        dsts.iter()
            .map(|&key| {
                if on {
                    EventKind::NoteOn { channel, key, vel }
                } else {
                    EventKind::NoteOff { channel, key, vel }
                }
            })
            .collect()
    }
}
