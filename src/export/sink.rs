//! Grid sinks that end up as an XLSX file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::grid::{GridSink, MemoryGrid};
use crate::types::{CellValue, StyleCategory};

use super::package::write_package;
use super::sheet_writer::{last_column_letter, write_sheet_xml};
use super::styles_writer::write_styles_xml;

/// Collects cells for one worksheet and serializes them as an XLSX package.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    grid: MemoryGrid,
    sheet_name: String,
}

impl XlsxSink {
    #[must_use]
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            grid: MemoryGrid::new(),
            sheet_name: sheet_name.into(),
        }
    }

    /// Cells written so far.
    #[must_use]
    pub fn grid(&self) -> &MemoryGrid {
        &self.grid
    }

    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// The XLSX file for the cells written so far.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let sheet_xml = write_sheet_xml(&self.grid);
        let styles_xml = write_styles_xml();
        write_package(&self.sheet_name, &sheet_xml, &styles_xml)
    }
}

impl GridSink for XlsxSink {
    fn write(&mut self, row: u32, col: u32, value: CellValue, style: StyleCategory) -> Result<()> {
        self.grid.write(row, col, value, style)
    }
}

/// An [`XlsxSink`] bound to an output file that is finalized exactly once.
///
/// The file is created when the sink is opened. [`XlsxFile::close`] writes
/// the package and reports errors; a sink dropped without `close` (early
/// return, unwinding) writes whatever cells it holds and logs failures.
#[derive(Debug)]
pub struct XlsxFile {
    sink: XlsxSink,
    path: PathBuf,
    file: Option<File>,
}

impl XlsxFile {
    /// Create (or truncate) `path` and start an empty worksheet.
    pub fn create(path: impl AsRef<Path>, sheet_name: impl Into<String>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            sink: XlsxSink::new(sheet_name),
            path,
            file: Some(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn grid(&self) -> &MemoryGrid {
        self.sink.grid()
    }

    /// Serialize and flush the workbook.
    pub fn close(mut self) -> Result<()> {
        self.finalize()
    }

    fn finalize(&mut self) -> Result<()> {
        let mut file = self.file.take().ok_or(ReportError::AlreadyFinalized)?;
        let bytes = self.sink.to_bytes()?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        info!(
            path = %self.path.display(),
            cells = self.sink.grid().len(),
            last_col = last_column_letter(self.sink.grid()).as_deref().unwrap_or("-"),
            bytes = bytes.len(),
            "wrote workbook"
        );
        Ok(())
    }
}

impl GridSink for XlsxFile {
    fn write(&mut self, row: u32, col: u32, value: CellValue, style: StyleCategory) -> Result<()> {
        if self.file.is_none() {
            return Err(ReportError::AlreadyFinalized);
        }
        self.sink.write(row, col, value, style)
    }
}

impl Drop for XlsxFile {
    fn drop(&mut self) {
        if self.file.is_some() {
            if let Err(e) = self.finalize() {
                warn!(path = %self.path.display(), error = %e, "finalizing workbook on drop failed");
            }
        }
    }
}
