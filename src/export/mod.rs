//! XLSX export pipeline.
//!
//! Cells are collected in memory and serialized once, at the end, into a
//! single-worksheet package. Styling is resolved here from the category each
//! write requested.

pub(crate) mod package;
pub(crate) mod sheet_writer;
mod sink;
pub(crate) mod styles_writer;

pub use sink::{XlsxFile, XlsxSink};

use std::borrow::Borrow;
use std::path::Path;
use tracing::error;

use crate::compose::{ReportComposer, ReportSummary};
use crate::error::Result;
use crate::types::Record;

/// Compose `records` into a new XLSX file at `path`.
///
/// The workbook is finalized whether or not composition succeeds, so cells
/// written before a failing record are kept. A composition error takes
/// precedence over a finalize error.
pub fn write_report<I>(path: &Path, composer: &ReportComposer, records: I) -> Result<ReportSummary>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let mut file = XlsxFile::create(path, composer.config().sheet_name.as_str())?;
    let composed = composer.compose(&mut file, records);
    let closed = file.close();

    match (composed, closed) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                error!(error = %close_err, "finalizing workbook after failed composition");
            }
            Err(e)
        }
    }
}
