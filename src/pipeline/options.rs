//! Conversion options — the three switches selecting the output variant.
//!
//! Options are an explicit value constructed once and passed into
//! [`Pipeline::new`](super::Pipeline::new). They can come from CLI flags,
//! from a YAML file next to the charts, or fall back to defaults.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What the practice-mode trigger track is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeClick {
    /// Keyframe triggers from the keys part only.
    #[default]
    KeysOnly,
    /// Keyframe triggers plus a drum click, recommended with multitracks.
    WithDrums,
}

/// Which instrument pair the chart targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartLayout {
    /// Keep guitar + bass; drop the co-op and rhythm parts.
    #[default]
    GuitarBass,
    /// Keep lead + rhythm (and the co-op part); drop bass.
    LeadRhythm,
}

/// Name given to the band melody track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BandMelody {
    #[default]
    Singer,
    Keys,
}

/// The full switch set for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    pub practice_click: PracticeClick,
    pub layout: ChartLayout,
    pub band_melody: BandMelody,
}

impl ConvertOptions {
    /// Load options from a YAML file. Missing or unreadable files yield
    /// `None` so callers can fall back to defaults.
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_configuration() {
        let options = ConvertOptions::default();
        assert_eq!(options.practice_click, PracticeClick::KeysOnly);
        assert_eq!(options.layout, ChartLayout::GuitarBass);
        assert_eq!(options.band_melody, BandMelody::Singer);
    }

    #[test]
    fn yaml_round_trip() {
        let options = ConvertOptions {
            practice_click: PracticeClick::WithDrums,
            layout: ChartLayout::LeadRhythm,
            band_melody: BandMelody::Keys,
        };
        let yaml = serde_yaml::to_string(&options).unwrap();
        let parsed: ConvertOptions = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let parsed: ConvertOptions = serde_yaml::from_str("layout: lead-rhythm\n").unwrap();
        assert_eq!(parsed.layout, ChartLayout::LeadRhythm);
        assert_eq!(parsed.practice_click, PracticeClick::KeysOnly);
        assert_eq!(parsed.band_melody, BandMelody::Singer);
    }

    #[test]
    fn load_missing_file_returns_none() {
        assert!(ConvertOptions::load(Path::new("/nonexistent/refret.yaml")).is_none());
    }

    #[test]
    fn load_unreadable_yaml_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("refret.yaml");
        std::fs::write(&path, "layout: [not, a, variant").unwrap();
        assert!(ConvertOptions::load(&path).is_none());
    }
}
