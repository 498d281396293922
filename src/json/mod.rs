//! Document ↔ bytes for `application/json` (spec §4.2).

pub(crate) mod format;
mod parse;

pub use parse::parse;

use crate::value::Value;

/// Compact canonical form: object members in insertion order, no extra
/// whitespace.
pub fn stringify(value: &Value) -> Vec<u8> {
    format::stringify(value, false)
}

/// Same canonical form as [`stringify`] but indented two spaces per level,
/// for output meant to be read by humans.
pub fn stringify_pretty(value: &Value) -> Vec<u8> {
    format::stringify(value, true)
}
