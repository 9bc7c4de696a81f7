//! Loading result records from JSON.
//!
//! Two input shapes are accepted: a single file holding a JSON array of
//! records, or a directory with one record per `*.json` file.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::types::Record;

/// Load from a file or a directory, whichever `path` is.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if path.is_dir() {
        load_records_dir(path)
    } else {
        load_records_file(path)
    }
}

/// Parse a file containing a JSON array of records.
pub fn load_records_file(path: &Path) -> Result<Vec<Record>> {
    let data = fs::read(path)?;
    let values: Vec<Value> = serde_json::from_slice(&data)?;
    let records = values
        .into_iter()
        .map(Record::from_value)
        .collect::<Result<Vec<_>>>()?;
    debug!(path = %path.display(), records = records.len(), "loaded record file");
    Ok(records)
}

/// Parse every `*.json` file in `dir`, one record each, in file-name order.
pub fn load_records_dir(dir: &Path) -> Result<Vec<Record>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut records = Vec::with_capacity(paths.len());
    for path in &paths {
        let data = fs::read(path)?;
        records.push(Record::from_value(serde_json::from_slice(&data)?)?);
    }
    debug!(dir = %dir.display(), records = records.len(), "loaded record directory");
    Ok(records)
}

/// Order records by `(dataset, instance, case)`; equal keys keep their order.
pub fn sort_by_problem(records: &mut [Record]) {
    records.sort_by_key(|r| r.problem);
}
