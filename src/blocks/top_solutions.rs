//! Top-solutions ranked list block.

use crate::cell_ref::offset;
use crate::error::{ReportError, Result};
use crate::grid::{BlockScope, GridSink};
use crate::types::{Candidate, CellValue, Cursor, Placed, StyleCategory};

/// Rows shown when the configuration does not say otherwise.
pub const DEFAULT_TOP_N: usize = 5;

const HEADING: &str = "Top Solutions:";

/// Population ordered by score, best first. Equal scores keep their input order.
#[must_use]
pub fn rank_population(population: &[Candidate]) -> Vec<&Candidate> {
    let mut ranked: Vec<&Candidate> = population.iter().collect();
    ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ranked
}

/// The `n` best candidates, one per row: score, then encoding.
///
/// The population must hold at least `n` members; there is no padding.
/// Returns `origin + (n, 2)`.
pub fn write_top_solutions<S: GridSink + ?Sized>(
    sink: &mut S,
    population: &[Candidate],
    n: usize,
    origin: Cursor,
) -> Result<Placed> {
    if population.len() < n {
        return Err(ReportError::PopulationTooSmall {
            requested: n,
            available: population.len(),
        });
    }
    let height = offset("top-n count", n)?;

    let mut block = BlockScope::new(sink, origin);
    block.put(0, 0, HEADING, StyleCategory::Label)?;
    for (row, candidate) in (0u32..).zip(rank_population(population).into_iter().take(n)) {
        block.put(row, 1, candidate.score(), StyleCategory::Highlight)?;
        block.put(
            row,
            2,
            CellValue::from_json(candidate.encoding()),
            StyleCategory::Highlight,
        )?;
    }

    Ok(block.finish(origin.offset(height, 2)?))
}
