//! refret — command-line batch chart converter.
//!
//! Scans a directory for `.mid` charts, converts each to the five-lane
//! layout, and writes the results alongside the inputs.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use refret::batch;
use refret::pipeline::{BandMelody, ChartLayout, ConvertOptions, PracticeClick};

/// Options file looked up in the input directory when `--config` is not
/// given.
const OPTIONS_FILE: &str = "refret.yaml";

#[derive(Debug, Parser)]
#[command(
    name = "refret",
    version,
    about = "Re-fret rhythm-game MIDI charts into the five-lane console layout",
    long_about = "Re-fret rhythm-game MIDI charts into the five-lane console layout.\n\n\
        Every .mid file in the input directory is converted independently and\n\
        written back with the _gh2 suffix; files already carrying the suffix\n\
        are skipped. Lead/rhythm charts need a guitar co-op part; it can be\n\
        copied from the guitar chart."
)]
struct Cli {
    /// Directory scanned for input charts.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Practice-mode click: keyframes only, or with a drum click.
    #[arg(long, value_enum)]
    practice_click: Option<PracticeClick>,

    /// Which instrument pair the chart targets.
    #[arg(long, value_enum)]
    layout: Option<ChartLayout>,

    /// Name given to the band melody track.
    #[arg(long, value_enum)]
    band: Option<BandMelody>,

    /// Options file overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Resolve the effective options: explicit flag > options file > default.
fn resolve_options(cli: &Cli) -> ConvertOptions {
    let file = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.dir.join(OPTIONS_FILE));
    let mut options = ConvertOptions::load(&file).unwrap_or_default();
    if let Some(click) = cli.practice_click {
        options.practice_click = click;
    }
    if let Some(layout) = cli.layout {
        options.layout = layout;
    }
    if let Some(band) = cli.band {
        options.band_melody = band;
    }
    options
}

fn main() {
    let cli = Cli::parse();
    let options = resolve_options(&cli);

    match batch::convert_dir(&cli.dir, options) {
        Ok(summary) => {
            if summary.failed > 0 {
                eprintln!("{} chart(s) failed", summary.failed);
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("cannot read {}: {err}", cli.dir.display());
            process::exit(1);
        }
    }
}
