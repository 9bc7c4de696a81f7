//! Generates worksheet XML from the written grid.
//!
//! Strings are written inline (`t="inlineStr"`) so no shared string table is
//! needed. Cells come out row-major, which is the order `<sheetData>` requires.

use quick_xml::escape::escape;
use std::borrow::Cow;
use tracing::warn;

use crate::cell_ref::{cell_ref, col_to_letter};
use crate::grid::{MemoryGrid, WrittenCell};
use crate::types::CellValue;

const MIN_COL_WIDTH: usize = 8;
const MAX_COL_WIDTH: usize = 60;

/// Excel's limit on the characters held by one cell.
pub(crate) const MAX_CELL_TEXT_CHARS: usize = 32_767;

/// Write a complete worksheet XML string from a grid.
pub(crate) fn write_sheet_xml(grid: &MemoryGrid) -> String {
    let mut out = String::with_capacity(4096 + grid.len() * 48);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');

    // <dimension>
    if let Some(fp) = grid.extent() {
        out.push_str(&format!(
            "<dimension ref=\"{}:{}\"/>\n",
            cell_ref(fp.top, fp.left),
            cell_ref(fp.bottom, fp.right)
        ));
    }

    // <cols>
    let widths = column_widths(grid);
    if !widths.is_empty() {
        out.push_str("<cols>\n");
        for (col, width) in &widths {
            let col1 = u64::from(*col) + 1; // XLSX is 1-based
            out.push_str(&format!(
                "<col min=\"{col1}\" max=\"{col1}\" width=\"{width}\" customWidth=\"1\"/>\n"
            ));
        }
        out.push_str("</cols>\n");
    }

    // <sheetData>
    out.push_str("<sheetData>\n");
    write_sheet_data(&mut out, grid);
    out.push_str("</sheetData>\n");

    out.push_str("</worksheet>");
    out
}

/// Write all cell rows into `<sheetData>`.
fn write_sheet_data(out: &mut String, grid: &MemoryGrid) {
    let mut current_row: Option<u32> = None;
    for (row, col, cell) in grid.cells() {
        if current_row != Some(row) {
            if current_row.is_some() {
                out.push_str("</row>\n");
            }
            out.push_str(&format!("<row r=\"{}\">", u64::from(row) + 1));
            current_row = Some(row);
        }
        write_cell(out, row, col, cell);
    }
    if current_row.is_some() {
        out.push_str("</row>\n");
    }
}

/// Write a single `<c>` element.
fn write_cell(out: &mut String, row: u32, col: u32, cell: &WrittenCell) {
    out.push_str(&format!(
        "<c r=\"{}\" s=\"{}\"",
        cell_ref(row, col),
        cell.style.xf_index()
    ));

    match &cell.value {
        CellValue::Number(n) if n.is_finite() => {
            out.push_str(&format!("><v>{n}</v></c>"));
        }
        // NaN and infinities have no XLSX number form
        CellValue::Number(_) => {
            out.push_str(" t=\"e\"><v>#NUM!</v></c>");
        }
        CellValue::Text(s) => {
            out.push_str(" t=\"inlineStr\"><is><t xml:space=\"preserve\">");
            out.push_str(&escape(&cell_text(s, row, col)));
            out.push_str("</t></is></c>");
        }
        CellValue::Bool(b) => {
            let val = if *b { "1" } else { "0" };
            out.push_str(&format!(" t=\"b\"><v>{val}</v></c>"));
        }
        CellValue::Empty => {
            out.push_str("/>");
        }
    }
}

/// Text as it can be stored: no XML-illegal control characters, at most
/// [`MAX_CELL_TEXT_CHARS`] characters.
fn cell_text(text: &str, row: u32, col: u32) -> Cow<'_, str> {
    if !text.chars().any(is_xml_illegal) && text.chars().nth(MAX_CELL_TEXT_CHARS).is_none() {
        return Cow::Borrowed(text);
    }

    let kept: String = text.chars().filter(|&c| !is_xml_illegal(c)).collect();
    let chars = kept.chars().count();
    if chars <= MAX_CELL_TEXT_CHARS {
        return Cow::Owned(kept);
    }
    warn!(
        cell = %cell_ref(row, col),
        chars,
        limit = MAX_CELL_TEXT_CHARS,
        "truncating cell text"
    );
    Cow::Owned(kept.chars().take(MAX_CELL_TEXT_CHARS).collect())
}

/// Characters XML 1.0 does not allow, even escaped.
fn is_xml_illegal(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// Per-column widths from the longest display text, in character units.
fn column_widths(grid: &MemoryGrid) -> Vec<(u32, usize)> {
    let mut widths: Vec<(u32, usize)> = Vec::new();
    for (_, col, cell) in grid.cells() {
        let len = cell.value.display().chars().count() + 2;
        match widths.iter_mut().find(|(c, _)| *c == col) {
            Some(entry) => entry.1 = entry.1.max(len),
            None => widths.push((col, len)),
        }
    }
    widths.sort_unstable_by_key(|(col, _)| *col);
    for entry in &mut widths {
        entry.1 = entry.1.clamp(MIN_COL_WIDTH, MAX_COL_WIDTH);
    }
    widths
}

/// Column letters of the rightmost written column, for log messages.
pub(crate) fn last_column_letter(grid: &MemoryGrid) -> Option<String> {
    grid.extent().map(|fp| col_to_letter(fp.right))
}
