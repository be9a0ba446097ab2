//! Refret — a batch rhythm-game chart converter.
//!
//! Loads multi-track MIDI note charts, recombines and pitch-remaps their
//! named tracks into the classic five-lane console layout, and writes each
//! result next to its input with the `_gh2` suffix.

pub mod batch;
pub mod chart;
pub mod ops;
pub mod pipeline;
