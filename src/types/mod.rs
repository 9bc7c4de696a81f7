//! Data types for the report layout engine.

mod cell;
mod cursor;
mod record;

pub use cell::*;
pub use cursor::*;
pub use record::*;
