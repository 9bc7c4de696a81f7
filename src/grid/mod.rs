//! The grid surface blocks are written onto.
//!
//! [`GridSink`] is the only thing block writers know about the output: a
//! "write value at (row, col) with a style" primitive. [`BlockScope`] wraps a
//! sink for the duration of one block, offsets writes from the block origin
//! and measures the block's footprint from the writes themselves.

mod memory;

pub use memory::{MemoryGrid, WrittenCell};

use crate::cell_ref::check_bounds;
use crate::error::Result;
use crate::types::{CellValue, Cursor, Footprint, Placed, StyleCategory};

/// A two-dimensional surface accepting styled cell writes.
///
/// Writes are append-only: a second write to the same cell is an error.
pub trait GridSink {
    fn write(&mut self, row: u32, col: u32, value: CellValue, style: StyleCategory) -> Result<()>;
}

impl<S: GridSink + ?Sized> GridSink for &mut S {
    fn write(&mut self, row: u32, col: u32, value: CellValue, style: StyleCategory) -> Result<()> {
        (**self).write(row, col, value, style)
    }
}

/// Writes for one block, relative to its origin.
pub struct BlockScope<'a, S: GridSink + ?Sized> {
    sink: &'a mut S,
    origin: Cursor,
    footprint: Option<Footprint>,
    cells: usize,
}

impl<'a, S: GridSink + ?Sized> BlockScope<'a, S> {
    pub fn new(sink: &'a mut S, origin: Cursor) -> Self {
        Self {
            sink,
            origin,
            footprint: None,
            cells: 0,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Cursor {
        self.origin
    }

    /// Write `value` at `origin + (row_off, col_off)`.
    pub fn put(
        &mut self,
        row_off: u32,
        col_off: u32,
        value: impl Into<CellValue>,
        style: StyleCategory,
    ) -> Result<()> {
        let at = self.origin.offset(row_off, col_off)?;
        check_bounds(at.row, at.col)?;
        self.sink.write(at.row, at.col, value.into(), style)?;

        match &mut self.footprint {
            Some(fp) => fp.include(at.row, at.col),
            None => self.footprint = Some(Footprint::cell(at.row, at.col)),
        }
        self.cells += 1;
        Ok(())
    }

    /// Number of cells written so far.
    #[must_use]
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Close the block, pairing the writer's cursor with the measured footprint.
    #[must_use]
    pub fn finish(self, cursor: Cursor) -> Placed {
        let footprint = self
            .footprint
            .unwrap_or_else(|| Footprint::cell(self.origin.row, self.origin.col));
        Placed { cursor, footprint }
    }
}
