//! Generic recursive-descent parsing over byte slices (spec §4.1).
//!
//! This module is deliberately grammar-agnostic: [`crate::json`] and
//! [`crate::syslog`] are both built entirely out of [`Cursor`] plus the
//! combinators below, with no grammar-specific code living here.

mod combinators;
mod cursor;

pub use combinators::{any_of, capture, ch, literal, lookahead, none_of, not, opt, range, times};
pub use cursor::Cursor;

/// Render a short, lossy-UTF-8 window of `input` around `offset`, for
/// `debug!` logging at a parse-failure site. Never panics on a
/// non-UTF-8/out-of-range offset.
pub fn byte_window(input: &[u8], offset: usize) -> String {
    const RADIUS: usize = 16;
    let start = offset.saturating_sub(RADIUS);
    let end = (offset + RADIUS).min(input.len());
    let start = start.min(input.len());
    format!("...{}...", String::from_utf8_lossy(&input[start..end]))
}
