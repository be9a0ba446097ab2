//! Per-file batch surface: enumerate charts, convert each independently.
//!
//! Every `.mid` file in the input directory is one unit of work: load,
//! transform, save. A failure is reported and skipped; it never aborts the
//! rest of the batch, and the failed document is dropped whole.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::chart::{load, save, ChartError};
use crate::pipeline::{ConvertOptions, Pipeline};

/// Suffix appended to converted output stems. Files already carrying it
/// are never picked up as inputs.
pub const OUTPUT_SUFFIX: &str = "_gh2";

/// Totals for one directory run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Chart files in `dir` eligible for conversion, sorted by name so runs
/// are deterministic.
pub fn scan_inputs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_chart = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mid"));
        let already_converted = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
        if is_chart && !already_converted {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Output path for an input chart: same directory, stem + suffix.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.mid"))
}

/// Convert one chart: load, run the pipeline, save next to the input.
pub fn convert_file(input: &Path, options: ConvertOptions) -> Result<PathBuf, ChartError> {
    let mut doc = load(input)?;
    Pipeline::new(options).run(&mut doc);
    let output = output_path(input);
    save(&doc, &output)?;
    Ok(output)
}

/// Convert every eligible chart in `dir`, each independently.
pub fn convert_dir(dir: &Path, options: ConvertOptions) -> io::Result<BatchSummary> {
    let inputs = scan_inputs(dir)?;
    if inputs.is_empty() {
        println!("No chart files found in {}", dir.display());
        return Ok(BatchSummary::default());
    }

    let mut summary = BatchSummary::default();
    for input in inputs {
        println!("Processing: {}", input.display());
        match convert_file(&input, options) {
            Ok(output) => {
                println!("Saved as: {}\n", output.display());
                summary.converted += 1;
            }
            Err(err) => {
                eprintln!("Failed on {}: {err}\n", input.display());
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}
