//! Optimizer parameter dump block.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::grid::{BlockScope, GridSink};
use crate::types::{Cursor, Placed, StyleCategory};

const LABEL: &str = "Optimizer Params:";

/// Label plus the whole parameter mapping serialized into a single cell.
///
/// Returns `origin + (1, 1)`.
pub fn write_optimizer_params<S: GridSink + ?Sized>(
    sink: &mut S,
    params: &Map<String, Value>,
    origin: Cursor,
) -> Result<Placed> {
    let text = serde_json::to_string(params)?;

    let mut block = BlockScope::new(sink, origin);
    block.put(0, 0, LABEL, StyleCategory::Label)?;
    block.put(0, 1, text, StyleCategory::Plain)?;
    Ok(block.finish(origin.offset(1, 1)?))
}
