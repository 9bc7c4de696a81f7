use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// The next free `(row, col)` position handed from one block to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub row: u32,
    pub col: u32,
}

impl Cursor {
    pub const ORIGIN: Cursor = Cursor { row: 0, col: 0 };

    #[must_use]
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Cursor moved by `(rows, cols)`, failing on `u32` overflow.
    pub fn offset(self, rows: u32, cols: u32) -> Result<Cursor> {
        let row = self.row.checked_add(rows).ok_or(ReportError::GridOverflow {
            what: "row",
            value: u64::from(self.row) + u64::from(rows),
        })?;
        let col = self.col.checked_add(cols).ok_or(ReportError::GridOverflow {
            what: "column",
            value: u64::from(self.col) + u64::from(cols),
        })?;
        Ok(Cursor { row, col })
    }
}

/// Inclusive bounding rectangle of the cells one block wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Footprint {
    /// A footprint covering a single cell.
    #[must_use]
    pub fn cell(row: u32, col: u32) -> Self {
        Self {
            top: row,
            left: col,
            bottom: row,
            right: col,
        }
    }

    /// Grow to cover `(row, col)`.
    pub fn include(&mut self, row: u32, col: u32) {
        self.top = self.top.min(row);
        self.left = self.left.min(col);
        self.bottom = self.bottom.max(row);
        self.right = self.right.max(col);
    }

    /// Smallest footprint covering both.
    #[must_use]
    pub fn union(self, other: Footprint) -> Footprint {
        let mut out = self;
        out.include(other.top, other.left);
        out.include(other.bottom, other.right);
        out
    }

    /// First row below the footprint.
    #[must_use]
    pub fn row_end(&self) -> u32 {
        self.bottom.saturating_add(1)
    }

    /// First column right of the footprint.
    #[must_use]
    pub fn col_end(&self) -> u32 {
        self.right.saturating_add(1)
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.bottom - self.top + 1
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.right - self.left + 1
    }

    #[must_use]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.top..=self.bottom).contains(&row) && (self.left..=self.right).contains(&col)
    }

    #[must_use]
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.top <= other.bottom
            && other.top <= self.bottom
            && self.left <= other.right
            && other.left <= self.right
    }
}

/// What a block writer hands back: its cursor and the cells it actually covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placed {
    pub cursor: Cursor,
    pub footprint: Footprint,
}
