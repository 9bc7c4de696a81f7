//! Common test utilities: record fixtures and XLSX read-back.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use optreport::cell_ref::parse_cell_ref;
use optreport::{Candidate, ImprovementGeneration, ProblemId, Record, ToleranceStep};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{json, Map};

// ============================================================================
// Record fixtures
// ============================================================================

/// Summary record with `points` improvement events and `pop` candidates.
///
/// Timestamps start at 1000.0 and advance by 0.5 per event; candidate `i`
/// scores `i * 10` and encodes as `"sol{i}"`.
#[must_use]
pub fn summary_record(problem: ProblemId, points: usize, pop: usize) -> Record {
    let series = (0..points)
        .map(|i| ImprovementGeneration(1000.0 + i as f64 * 0.5, (i as u64 + 1) * 4, i as f64 * 2.0))
        .collect();
    let population = (0..pop)
        .map(|i| Candidate(i as f64 * 10.0, json!(format!("sol{i}"))))
        .collect();
    let mut params = Map::new();
    params.insert("popsize".into(), json!(pop));
    params.insert("metaheuristic".into(), json!("Rao1"));
    Record::summary(problem, series, population, params)
}

/// Tolerance record with one trial per entry of `lens`.
#[must_use]
pub fn tolerance_record(problem: ProblemId, lens: &[usize]) -> Record {
    let trials = lens
        .iter()
        .map(|&len| {
            (0..len)
                .map(|i| ToleranceStep {
                    tolerance: 0.05 * (i + 1) as f64,
                    objective: json!(100.0 - i as f64),
                    solution_status: json!("FEASIBLE_POINT"),
                    termination_status: json!(if i + 1 == len { "OPTIMAL" } else { "TIME_LIMIT" }),
                })
                .collect()
        })
        .collect();
    Record::tolerance(problem, trials)
}

/// The record shape the optimizer writes, as raw JSON.
#[must_use]
pub fn summary_json() -> serde_json::Value {
    json!([
        {
            "problem": {"dataset": 2, "instance": 0, "case": 1},
            "imp_gens": [[50.0, 1, 10.0], [51.0, 9, 12.0], [53.5, 30, 20.0]],
            "pop": [[10.0, [0, 1]], [20.0, [1, 1]], [12.0, [1, 0]], [5.0, [0, 0]], [18.0, [1, 2]], [1.0, [2, 2]]],
            "optimizer": {"popsize": 6, "metaheuristic": "Rao2"}
        },
        {
            "problem": {"dataset": 1, "instance": 3, "case": 0},
            "imp_gens": [[0.0, 1, 1.0]],
            "pop": [[3.0, "a"], [4.0, "b"], [5.0, "c"], [6.0, "d"], [7.0, "e"]],
            "optimizer": {}
        }
    ])
}

// ============================================================================
// XLSX read-back
// ============================================================================

/// A cell as found in the worksheet XML.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    pub text: String,
    /// `t` attribute, `None` for numbers.
    pub kind: Option<String>,
    /// `s` attribute.
    pub style: u32,
}

/// Read one part of the package as a string.
pub fn read_part(xlsx: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(xlsx)).expect("valid zip");
    let mut out = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {name}"))
        .read_to_string(&mut out)
        .unwrap();
    out
}

/// Sheet names declared in `xl/workbook.xml`.
pub fn sheet_names(xlsx: &[u8]) -> Vec<String> {
    let xml = read_part(xlsx, "xl/workbook.xml");
    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);
    let mut names = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e) | Event::Start(ref e)) if e.local_name().as_ref() == b"sheet" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        names.push(attr.unescape_value().unwrap().into_owned());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("workbook.xml: {e}"),
            _ => {}
        }
    }
    names
}

/// All cells of `xl/worksheets/sheet1.xml`, keyed by 0-indexed `(row, col)`.
pub fn read_sheet_cells(xlsx: &[u8]) -> BTreeMap<(u32, u32), SheetCell> {
    let xml = read_part(xlsx, "xl/worksheets/sheet1.xml");
    let mut reader = Reader::from_str(&xml);

    let mut cells = BTreeMap::new();
    let mut current: Option<((u32, u32), SheetCell)> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"c" => current = Some(cell_start(e)),
                b"v" | b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"c" => {
                let (at, cell) = cell_start(e);
                cells.insert(at, cell);
            }
            Ok(Event::Text(ref t)) if in_text => {
                if let Some((_, cell)) = current.as_mut() {
                    cell.text.push_str(&t.unescape().unwrap());
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"v" | b"t" => in_text = false,
                b"c" => {
                    if let Some((at, cell)) = current.take() {
                        cells.insert(at, cell);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => panic!("sheet1.xml: {e}"),
            _ => {}
        }
    }
    cells
}

fn cell_start(e: &BytesStart) -> ((u32, u32), SheetCell) {
    let mut at = None;
    let mut cell = SheetCell {
        text: String::new(),
        kind: None,
        style: 0,
    };
    for attr in e.attributes().flatten() {
        let value = std::str::from_utf8(&attr.value).unwrap().to_string();
        match attr.key.as_ref() {
            b"r" => at = parse_cell_ref(&value),
            b"t" => cell.kind = Some(value),
            b"s" => cell.style = value.parse().unwrap(),
            _ => {}
        }
    }
    (at.expect("cell without reference"), cell)
}

/// `(fontId, fillId, borderId)` of each `cellXfs` entry in `xl/styles.xml`.
pub fn read_cell_xfs(xlsx: &[u8]) -> Vec<(u32, u32, u32)> {
    let xml = read_part(xlsx, "xl/styles.xml");
    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);

    let mut xfs = Vec::new();
    let mut in_cell_xfs = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = true,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Ok(Event::Start(ref e) | Event::Empty(ref e))
                if in_cell_xfs && e.local_name().as_ref() == b"xf" =>
            {
                let attr_u32 = |key: &[u8]| -> u32 {
                    e.attributes()
                        .flatten()
                        .find(|a| a.key.as_ref() == key)
                        .map(|a| std::str::from_utf8(&a.value).unwrap().parse().unwrap())
                        .unwrap_or(0)
                };
                xfs.push((attr_u32(b"fontId"), attr_u32(b"fillId"), attr_u32(b"borderId")));
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("styles.xml: {e}"),
            _ => {}
        }
    }
    xfs
}

/// Unique scratch path under the system temp dir.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("optreport-it-{}-{name}", std::process::id()))
}
