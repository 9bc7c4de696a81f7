//! Block writers.
//!
//! Each writer takes a data fragment and an origin cursor, writes one
//! rectangular block through a [`BlockScope`](crate::grid::BlockScope) and
//! returns a [`Placed`]: the cursor for the block kind plus the footprint the
//! writes actually covered.

mod identity;
mod improvement;
mod params;
mod tolerance;
mod top_solutions;

pub use identity::write_identity;
pub use improvement::write_improvement_generations;
pub use params::write_optimizer_params;
pub use tolerance::write_tolerance_steps;
pub use top_solutions::{rank_population, write_top_solutions, DEFAULT_TOP_N};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::grid::GridSink;
use crate::types::{Cursor, Placed, Record};

/// Column, relative to the block origin, holding the row labels of the
/// matrix-shaped blocks. Data columns start right after it.
pub(crate) const ROW_LABEL_COL: u32 = 2;

/// The block kinds a report can be assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Identity,
    ImprovementGenerations,
    TopSolutions,
    OptimizerParams,
    ToleranceSteps,
}

impl BlockKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::ImprovementGenerations => "improvement generations",
            Self::TopSolutions => "top solutions",
            Self::OptimizerParams => "optimizer params",
            Self::ToleranceSteps => "tolerance increments",
        }
    }
}

/// Write the `kind` block for `record` at `origin`.
pub fn write_block<S: GridSink + ?Sized>(
    kind: BlockKind,
    sink: &mut S,
    record: &Record,
    origin: Cursor,
    config: &ReportConfig,
) -> Result<Placed> {
    let placed = match kind {
        BlockKind::Identity => write_identity(sink, &record.problem, config.identity(), origin)?,
        BlockKind::ImprovementGenerations => {
            let payload = record.summary_payload("imp_gens")?;
            write_improvement_generations(sink, &payload.improvement_generations, origin)?
        }
        BlockKind::TopSolutions => {
            let payload = record.summary_payload("pop")?;
            write_top_solutions(sink, &payload.population, config.top_n, origin)?
        }
        BlockKind::OptimizerParams => {
            let payload = record.summary_payload("optimizer")?;
            write_optimizer_params(sink, &payload.optimizer_params, origin)?
        }
        BlockKind::ToleranceSteps => {
            let payload = record.tolerance_payload()?;
            write_tolerance_steps(
                sink,
                &payload.tolerance_trials,
                config.trial_separation,
                origin,
            )?
        }
    };

    debug!(
        block = kind.name(),
        row = origin.row,
        col = origin.col,
        rows = placed.footprint.rows(),
        cols = placed.footprint.cols(),
        "placed block"
    );
    Ok(placed)
}
