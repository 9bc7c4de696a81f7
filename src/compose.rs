//! Report composition.
//!
//! Records are laid out top to bottom, one region each. Inside a region the
//! configured blocks are chained: each block starts where the previous one's
//! cursor points, pushed past any cell that block occupies so blocks never
//! overlap. The next region starts below the lowest cell of the previous one
//! plus `record_gap` blank rows, back at `left_col`.

use serde::Serialize;
use std::borrow::Borrow;
use tracing::{debug, info};

use crate::blocks::{write_block, BlockKind};
use crate::config::{Flow, ReportConfig};
use crate::error::{ReportError, Result};
use crate::grid::GridSink;
use crate::types::{Cursor, Footprint, Placed, ProblemId, Record};

/// Where one record ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRegion {
    pub problem: ProblemId,
    pub origin: Cursor,
    /// Bounding rectangle of all of the record's blocks.
    pub footprint: Footprint,
    pub blocks: Vec<(BlockKind, Placed)>,
}

/// Outcome of a composition pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub regions: Vec<RecordRegion>,
    /// Top row the next record would have used.
    pub next_row: u32,
}

impl ReportSummary {
    #[must_use]
    pub fn records(&self) -> usize {
        self.regions.len()
    }
}

/// Lays out records on a grid sink according to a [`ReportConfig`].
#[derive(Debug, Clone)]
pub struct ReportComposer {
    config: ReportConfig,
}

impl ReportComposer {
    /// Validates the configuration up front.
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Write every record, in order, starting at row 0.
    ///
    /// The first failing record aborts the pass; cells already written stay in
    /// the sink.
    pub fn compose<S, I>(&self, sink: &mut S, records: I) -> Result<ReportSummary>
    where
        S: GridSink + ?Sized,
        I: IntoIterator,
        I::Item: Borrow<Record>,
    {
        let mut summary = ReportSummary::default();
        for record in records {
            let record = record.borrow();
            let region = self
                .compose_record(sink, record, summary.next_row)
                .map_err(|e| ReportError::InRecord {
                    problem: record.problem,
                    source: Box::new(e),
                })?;
            summary.next_row = self.next_record_row(&region)?;
            summary.regions.push(region);
        }

        info!(
            records = summary.records(),
            rows = summary.next_row,
            "composed report"
        );
        Ok(summary)
    }

    /// Write one record's blocks with its region's top row at `top_row`.
    pub fn compose_record<S: GridSink + ?Sized>(
        &self,
        sink: &mut S,
        record: &Record,
        top_row: u32,
    ) -> Result<RecordRegion> {
        let origin = Cursor::new(top_row, self.config.left_col);
        let mut at = origin;
        let mut footprint: Option<Footprint> = None;
        let mut blocks = Vec::with_capacity(self.config.block_list().len());

        for &kind in self.config.block_list() {
            let placed = write_block(kind, sink, record, at, &self.config)?;
            at = self.next_block_origin(origin, &placed);
            footprint = Some(match footprint {
                Some(fp) => fp.union(placed.footprint),
                None => placed.footprint,
            });
            blocks.push((kind, placed));
        }

        let footprint = footprint.unwrap_or_else(|| Footprint::cell(origin.row, origin.col));
        debug!(
            problem = %record.problem,
            top = footprint.top,
            bottom = footprint.bottom,
            right = footprint.right,
            "composed record"
        );
        Ok(RecordRegion {
            problem: record.problem,
            origin,
            footprint,
            blocks,
        })
    }

    /// The returned cursor, pushed past the block along the flow axis.
    fn next_block_origin(&self, record_origin: Cursor, placed: &Placed) -> Cursor {
        match self.config.flow {
            Flow::Across => Cursor::new(
                record_origin.row,
                placed.cursor.col.max(placed.footprint.col_end()),
            ),
            Flow::Down => Cursor::new(
                placed.cursor.row.max(placed.footprint.row_end()),
                record_origin.col,
            ),
        }
    }

    fn next_record_row(&self, region: &RecordRegion) -> Result<u32> {
        let end = region.footprint.row_end();
        end.checked_add(self.config.record_gap)
            .ok_or(ReportError::GridOverflow {
                what: "row",
                value: u64::from(end) + u64::from(self.config.record_gap),
            })
    }
}
