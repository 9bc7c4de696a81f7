//! In-memory grid: the sink used by tests and the storage behind the XLSX sink.

use std::collections::BTreeMap;

use crate::cell_ref::cell_ref;
use crate::error::{ReportError, Result};
use crate::types::{CellValue, Footprint, StyleCategory};

use super::GridSink;

/// A cell as it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenCell {
    pub value: CellValue,
    pub style: StyleCategory,
}

/// Cells keyed by `(row, col)`; iteration is row-major.
#[derive(Debug, Default, Clone)]
pub struct MemoryGrid {
    cells: BTreeMap<(u32, u32), WrittenCell>,
}

impl MemoryGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, row: u32, col: u32) -> Option<&WrittenCell> {
        self.cells.get(&(row, col))
    }

    #[must_use]
    pub fn value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.get(row, col).map(|c| &c.value)
    }

    #[must_use]
    pub fn style(&self, row: u32, col: u32) -> Option<StyleCategory> {
        self.get(row, col).map(|c| c.style)
    }

    /// Display text of a cell.
    #[must_use]
    pub fn text(&self, row: u32, col: u32) -> Option<String> {
        self.value(row, col).map(CellValue::display)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &WrittenCell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: u32) -> impl Iterator<Item = (u32, &WrittenCell)> {
        self.cells
            .range((row, 0)..=(row, u32::MAX))
            .map(|(&(_, c), cell)| (c, cell))
    }

    /// Bounding rectangle of everything written, if anything was.
    #[must_use]
    pub fn extent(&self) -> Option<Footprint> {
        let mut cells = self.cells.keys();
        let &(r, c) = cells.next()?;
        let mut fp = Footprint::cell(r, c);
        for &(r, c) in cells {
            fp.include(r, c);
        }
        Some(fp)
    }
}

impl GridSink for MemoryGrid {
    fn write(&mut self, row: u32, col: u32, value: CellValue, style: StyleCategory) -> Result<()> {
        match self.cells.entry((row, col)) {
            std::collections::btree_map::Entry::Occupied(_) => Err(ReportError::CellOverlap {
                cell: cell_ref(row, col),
            }),
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(WrittenCell { value, style });
                Ok(())
            }
        }
    }
}
