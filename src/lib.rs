//! optreport - grid reports for optimization experiment results
//!
//! Lays out one region per result record on a single worksheet:
//! - Block writers for problem identity, improvement generations, top
//!   solutions, optimizer parameters and tolerance-increment matrices
//! - Cursor chaining that never places two blocks on the same cell
//! - An in-memory grid for tests and an XLSX sink for output
//!
//! # Usage
//!
//! ```no_run
//! use optreport::{load_records, sort_by_problem, write_report, ReportComposer, ReportConfig};
//!
//! # fn main() -> optreport::error::Result<()> {
//! let mut records = load_records("results.json".as_ref())?;
//! sort_by_problem(&mut records);
//! let composer = ReportComposer::new(ReportConfig::default())?;
//! write_report("report.xlsx".as_ref(), &composer, &records)?;
//! # Ok(())
//! # }
//! ```

pub mod blocks;
pub mod cell_ref;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod source;
pub mod types;

pub use compose::{RecordRegion, ReportComposer, ReportSummary};
pub use config::{Flow, IdentityFormat, ReportConfig, ReportVariant, TrialSeparation};
pub use export::{write_report, XlsxFile, XlsxSink};
pub use grid::{GridSink, MemoryGrid};
pub use source::{load_records, sort_by_problem};

pub use types::*;

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
