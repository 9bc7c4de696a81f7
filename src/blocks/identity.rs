//! Problem identity block.

use crate::config::IdentityFormat;
use crate::error::Result;
use crate::grid::{BlockScope, GridSink};
use crate::types::{Cursor, Placed, ProblemId, StyleCategory};

const LABEL: &str = "D/I/C:";

/// Label cell plus one value cell holding the problem identity.
///
/// Returns `origin + (1, 1)`.
pub fn write_identity<S: GridSink + ?Sized>(
    sink: &mut S,
    problem: &ProblemId,
    format: IdentityFormat,
    origin: Cursor,
) -> Result<Placed> {
    let text = match format {
        IdentityFormat::Slashed => problem.to_string(),
        IdentityFormat::Json => problem.to_json()?,
    };

    let mut block = BlockScope::new(sink, origin);
    block.put(0, 0, LABEL, StyleCategory::Label)?;
    block.put(0, 1, text, StyleCategory::Plain)?;
    Ok(block.finish(origin.offset(1, 1)?))
}
