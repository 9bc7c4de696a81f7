//! Tolerance-increment matrix block.

use crate::cell_ref::offset;
use crate::config::TrialSeparation;
use crate::error::{ReportError, Result};
use crate::grid::{BlockScope, GridSink};
use crate::types::{CellValue, Cursor, Placed, StyleCategory, ToleranceStep};

use super::ROW_LABEL_COL;

const HEADING: &str = "Tolerance Increments: ";
const ROW_LABELS: [&str; 4] = [
    "Tolerance:",
    "Objective:",
    "Solution status:",
    "Termination reason:",
];

/// Four-row matrix with one column per tolerance step.
///
/// Step columns are numbered across all trials; with
/// [`TrialSeparation::GapColumn`] a blank column sits between trials.
/// Returns `origin + (3, columns used by steps and gaps)`.
pub fn write_tolerance_steps<S: GridSink + ?Sized>(
    sink: &mut S,
    trials: &[Vec<ToleranceStep>],
    separation: TrialSeparation,
    origin: Cursor,
) -> Result<Placed> {
    let total: usize = trials.iter().map(Vec::len).sum();
    if total == 0 {
        return Err(ReportError::EmptySeries {
            block: "tolerance increments",
        });
    }
    offset("tolerance step count", total)?;

    let mut block = BlockScope::new(sink, origin);
    block.put(0, 0, HEADING, StyleCategory::Label)?;
    for (row, label) in (0u32..).zip(ROW_LABELS) {
        block.put(row, ROW_LABEL_COL, label, StyleCategory::Label)?;
    }

    let mut step_col: u32 = 0;
    let mut wrote_trial = false;
    for trial in trials.iter().filter(|t| !t.is_empty()) {
        if wrote_trial && separation == TrialSeparation::GapColumn {
            step_col = step_col.saturating_add(1);
        }
        wrote_trial = true;

        for step in trial {
            let col = ROW_LABEL_COL.saturating_add(1).saturating_add(step_col);
            block.put(0, col, step.tolerance, StyleCategory::Label)?;
            block.put(1, col, CellValue::from_json(&step.objective), StyleCategory::Data)?;
            block.put(
                2,
                col,
                CellValue::from_json(&step.solution_status),
                StyleCategory::Data,
            )?;
            block.put(
                3,
                col,
                CellValue::from_json(&step.termination_status),
                StyleCategory::Data,
            )?;
            step_col = step_col.saturating_add(1);
        }
    }

    Ok(block.finish(origin.offset(3, step_col)?))
}
