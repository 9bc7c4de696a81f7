//! XLSX output tests: write a report, read the package back.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

mod common;

use std::fs;

use optreport::error::ReportError;
use optreport::{
    write_report, CellValue, GridSink, ProblemId, ReportComposer, ReportConfig, ReportVariant,
    StyleCategory, XlsxSink,
};

fn composer(config: ReportConfig) -> ReportComposer {
    ReportComposer::new(config).unwrap()
}

#[test]
fn report_round_trips_through_the_package() {
    let path = common::temp_path("report.xlsx");
    let records = [
        common::summary_record(ProblemId::new(0, 0, 1), 4, 5),
        common::summary_record(ProblemId::new(0, 0, 2), 4, 5),
    ];
    let summary = write_report(&path, &composer(ReportConfig::default()), &records).unwrap();
    assert_eq!(summary.records(), 2);

    let xlsx = fs::read(&path).unwrap();
    assert_eq!(common::sheet_names(&xlsx), ["problem summaries"]);

    let cells = common::read_sheet_cells(&xlsx);
    let at = |r: u32, c: u32| cells.get(&(r, c)).expect("cell present");

    // Identity label and value
    assert_eq!(at(0, 0).text, "D/I/C:");
    assert_eq!(at(0, 0).style, StyleCategory::Label.xf_index());
    assert_eq!(at(0, 1).text, "0/0/1");
    assert_eq!(at(0, 1).kind.as_deref(), Some("inlineStr"));

    // Improvement generations: data from column F, elapsed from zero
    assert_eq!(at(0, 2).text, "Improvement Generations: ");
    assert_eq!(at(1, 4).text, "Applications:");
    assert_eq!(at(0, 5).text, "0");
    assert_eq!(at(0, 5).kind, None);
    assert_eq!(at(0, 5).style, StyleCategory::Data.xf_index());
    assert_eq!(at(0, 6).text, "0.5");

    // Top solutions, best first
    assert_eq!(at(0, 10).text, "40");
    assert_eq!(at(0, 11).text, "sol4");
    assert_eq!(at(0, 11).style, StyleCategory::Highlight.xf_index());

    // Second record below the first
    let second = summary.regions[1].origin.row;
    assert_eq!(at(second, 1).text, "0/0/2");
    assert_eq!(cells.len(), 2 * (2 + 1 + 3 + 3 * 4 + 1 + 5 * 2 + 2));

    fs::remove_file(&path).ok();
}

#[test]
fn stylesheet_matches_category_indices() {
    let sink = XlsxSink::new("s");
    let xlsx = sink.to_bytes().unwrap();
    let xfs = common::read_cell_xfs(&xlsx);

    assert_eq!(xfs.len(), StyleCategory::ALL.len());
    // (fontId, fillId, borderId): bold font 1, fills 2 and 3 are the two colours
    assert_eq!(xfs[StyleCategory::Plain.xf_index() as usize], (0, 0, 0));
    assert_eq!(xfs[StyleCategory::Label.xf_index() as usize], (1, 0, 0));
    assert_eq!(xfs[StyleCategory::Data.xf_index() as usize], (0, 2, 1));
    assert_eq!(xfs[StyleCategory::Highlight.xf_index() as usize], (0, 3, 1));

    let styles = common::read_part(&xlsx, "xl/styles.xml");
    assert!(styles.contains("FFCCFFFF"));
    assert!(styles.contains("FF85FFAA"));
}

#[test]
fn failed_composition_still_finalizes_the_file() {
    let path = common::temp_path("partial.xlsx");
    let records = [
        common::summary_record(ProblemId::new(0, 0, 1), 2, 5),
        common::summary_record(ProblemId::new(0, 0, 2), 2, 1),
    ];
    let err = write_report(&path, &composer(ReportConfig::default()), &records).unwrap_err();
    assert!(matches!(
        err.root(),
        ReportError::PopulationTooSmall {
            requested: 5,
            available: 1
        }
    ));

    let xlsx = fs::read(&path).unwrap();
    let cells = common::read_sheet_cells(&xlsx);
    assert_eq!(cells[&(0, 1)].text, "0/0/1");
    assert!(cells.values().any(|c| c.text == "0/0/2"));

    fs::remove_file(&path).ok();
}

#[test]
fn tolerance_report_with_custom_sheet_name() {
    let path = common::temp_path("tolerance.xlsx");
    let config = ReportConfig {
        sheet_name: "R&D <tolerance>".to_string(),
        ..ReportConfig::for_variant(ReportVariant::Tolerance)
    };
    let records = [common::tolerance_record(ProblemId::new(3, 2, 1), &[2, 1])];
    write_report(&path, &composer(config), &records).unwrap();

    let xlsx = fs::read(&path).unwrap();
    assert_eq!(common::sheet_names(&xlsx), ["R&D <tolerance>"]);

    let cells = common::read_sheet_cells(&xlsx);
    assert_eq!(cells[&(0, 1)].text, r#"{"dataset": 3, "instance": 2, "case": 1}"#);
    assert_eq!(cells[&(0, 2)].text, "Tolerance Increments: ");
    assert_eq!(cells[&(3, 4)].text, "Termination reason:");
    // Steps start three columns into the matrix and run across both trials.
    assert_eq!(cells[&(0, 5)].text, "0.05");
    assert_eq!(cells[&(0, 5)].style, StyleCategory::Label.xf_index());
    assert_eq!(cells[&(1, 5)].style, StyleCategory::Data.xf_index());
    assert_eq!(cells[&(3, 6)].text, "OPTIMAL");
    assert_eq!(cells[&(3, 7)].text, "OPTIMAL");
    assert!(!cells.contains_key(&(0, 8)));

    fs::remove_file(&path).ok();
}

#[test]
fn special_values_are_encoded() {
    let mut sink = XlsxSink::new("values");
    sink.write(0, 0, CellValue::Number(f64::NAN), StyleCategory::Data)
        .unwrap();
    sink.write(0, 1, CellValue::Bool(true), StyleCategory::Data)
        .unwrap();
    sink.write(0, 2, CellValue::Empty, StyleCategory::Data).unwrap();
    sink.write(0, 3, "a < b & c".into(), StyleCategory::Plain)
        .unwrap();

    let cells = common::read_sheet_cells(&sink.to_bytes().unwrap());
    assert_eq!(cells[&(0, 0)].kind.as_deref(), Some("e"));
    assert_eq!(cells[&(0, 0)].text, "#NUM!");
    assert_eq!(cells[&(0, 1)].kind.as_deref(), Some("b"));
    assert_eq!(cells[&(0, 1)].text, "1");
    assert_eq!(cells[&(0, 2)].text, "");
    assert_eq!(cells[&(0, 3)].text, "a < b & c");
}

#[test]
fn in_memory_sink_holds_every_composed_cell() {
    let records = [common::summary_record(ProblemId::new(1, 1, 1), 3, 6)];
    let mut sink = XlsxSink::new("problem summaries");
    composer(ReportConfig::default())
        .compose(&mut sink, &records)
        .unwrap();

    let cells = common::read_sheet_cells(&sink.to_bytes().unwrap());
    assert_eq!(cells.len(), sink.grid().len());
    for (row, col, written) in sink.grid().cells() {
        assert_eq!(cells[&(row, col)].text, written.value.display());
    }
}

#[test]
fn oversized_text_is_truncated_to_the_cell_limit() {
    let mut sink = XlsxSink::new("long");
    sink.write(0, 0, "x".repeat(40_000).into(), StyleCategory::Plain)
        .unwrap();
    sink.write(0, 1, "a\u{1}b\u{b}c".into(), StyleCategory::Plain)
        .unwrap();

    let cells = common::read_sheet_cells(&sink.to_bytes().unwrap());
    assert_eq!(cells[&(0, 0)].text.chars().count(), 32_767);
    assert_eq!(cells[&(0, 1)].text, "abc");
    // The in-memory grid keeps what the blocks wrote.
    assert_eq!(sink.grid().text(0, 0).unwrap().len(), 40_000);
}
