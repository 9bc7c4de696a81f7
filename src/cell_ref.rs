//! Utilities for Excel-style cell references.
//!
//! The grid is addressed `(row, col)`, both 0-indexed. References are `A1`
//! style: column letters then 1-based row number.

use crate::error::{ReportError, Result};

/// Number of rows in an XLSX worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Number of columns in an XLSX worksheet (`A`..=`XFD`).
pub const MAX_COLS: u32 = 16_384;

/// Convert a 0-indexed column to its letters (`0` → `A`, `26` → `AA`).
#[must_use]
pub fn col_to_letter(col: u32) -> String {
    let mut result = String::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let idx = u32::try_from(n % 26).unwrap_or(0);
        let c = char::from_u32(u32::from('A') + idx).unwrap_or('A');
        result.insert(0, c);
        n /= 26;
    }
    result
}

/// Format a 0-indexed `(row, col)` pair as an `A1` reference.
#[must_use]
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), u64::from(row) + 1)
}

/// Parse a cell reference like "B3" into `(row, col)`, 0-indexed.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() && !saw_row {
            let upper = ch.to_ascii_uppercase();
            col = col.checked_mul(26)?.checked_add(upper as u32 - 'A' as u32 + 1)?;
            saw_col = true;
        } else if ch.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// Reject coordinates that do not fit a worksheet.
pub fn check_bounds(row: u32, col: u32) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(ReportError::GridOverflow {
            what: "row",
            value: u64::from(row),
        });
    }
    if col >= MAX_COLS {
        return Err(ReportError::GridOverflow {
            what: "column",
            value: u64::from(col),
        });
    }
    Ok(())
}

/// Convert a data-driven count or index into a grid offset.
pub fn offset(what: &'static str, n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| ReportError::GridOverflow {
        what,
        value: u64::try_from(n).unwrap_or(u64::MAX),
    })
}
