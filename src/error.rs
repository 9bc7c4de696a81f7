//! Structured error types for optreport.
//!
//! Every failure is fatal for the run: precondition violations come from the
//! record source, sink failures from the output side. Nothing is retried.

use crate::types::ProblemId;

/// All errors that can occur while composing or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A block needs at least one data point and got none.
    #[error("{block}: empty series")]
    EmptySeries { block: &'static str },

    /// Fewer candidates than the ranked list was asked to show.
    #[error("top solutions: population has {available} members, {requested} requested")]
    PopulationTooSmall { requested: usize, available: usize },

    /// A block was selected for a record that lacks its data.
    #[error("record is missing `{field}`")]
    MissingField { field: &'static str },

    /// Failure while composing one record; wraps the underlying error.
    #[error("record {problem}: {source}")]
    InRecord {
        problem: ProblemId,
        source: Box<ReportError>,
    },

    /// Two writes landed on the same cell.
    #[error("cell {cell} written twice")]
    CellOverlap { cell: String },

    /// A coordinate or count does not fit the worksheet.
    #[error("{what} out of range: {value}")]
    GridOverflow { what: &'static str, value: u64 },

    /// Invalid report configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The sink was written to after it was finalized.
    #[error("report already finalized")]
    AlreadyFinalized,

    /// JSON decoding error (records or configuration).
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// The error with any record context stripped.
    #[must_use]
    pub fn root(&self) -> &ReportError {
        match self {
            Self::InRecord { source, .. } => source.root(),
            other => other,
        }
    }

    /// True for errors caused by the input records rather than the output side.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self.root(),
            Self::EmptySeries { .. } | Self::PopulationTooSmall { .. } | Self::MissingField { .. }
        )
    }
}
