//! Improvement-generations time series block.

use crate::cell_ref::offset;
use crate::error::{ReportError, Result};
use crate::grid::{BlockScope, GridSink};
use crate::types::{Cursor, ImprovementGeneration, Placed, StyleCategory};

use super::ROW_LABEL_COL;

const HEADING: &str = "Improvement Generations: ";
const ROW_LABELS: [&str; 3] = ["Time:", "Applications:", "Score:"];

/// Three-row time series: elapsed time, applications and score, one column
/// per improvement event.
///
/// Elapsed time is measured from the first event, so the series always starts
/// at zero. Returns `origin + (3, N)`.
pub fn write_improvement_generations<S: GridSink + ?Sized>(
    sink: &mut S,
    series: &[ImprovementGeneration],
    origin: Cursor,
) -> Result<Placed> {
    let start = series
        .first()
        .ok_or(ReportError::EmptySeries {
            block: "improvement generations",
        })?
        .timestamp();
    let width = offset("series length", series.len())?;

    let mut block = BlockScope::new(sink, origin);
    block.put(0, 0, HEADING, StyleCategory::Label)?;
    for (row, label) in (0u32..).zip(ROW_LABELS) {
        block.put(row, ROW_LABEL_COL, label, StyleCategory::Label)?;
    }

    for (i, point) in (0u32..).zip(series) {
        let col = ROW_LABEL_COL.saturating_add(1).saturating_add(i);
        block.put(0, col, point.timestamp() - start, StyleCategory::Data)?;
        block.put(1, col, point.applications(), StyleCategory::Data)?;
        block.put(2, col, point.score(), StyleCategory::Data)?;
    }

    Ok(block.finish(origin.offset(3, width)?))
}
