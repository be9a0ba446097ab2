//! Stable chronological union of absolute timelines.

use super::timeline::Timed;

/// Merge timelines into one sequence ordered by absolute tick.
///
/// Ties keep source order: at equal ticks, every event of an earlier
/// source sorts before any event of a later one, and order within a single
/// source is preserved. O(n log n) in the total event count, and the
/// result is the same whether sources are merged at once or pairwise in
/// sequence, so chains of merges compose.
pub fn chronological(sources: Vec<Vec<Timed>>) -> Vec<Timed> {
    let mut merged: Vec<Timed> = sources.into_iter().flatten().collect();
    // Vec::sort_by_key is stable, which is what keeps ties deterministic.
    merged.sort_by_key(|timed| timed.at);
    merged
}
