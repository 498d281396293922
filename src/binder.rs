//! Typed, named projectors between raw scalars/slices and document fields
//! (spec §4.3).
//!
//! A `Binder` is directional: [`Binder::bind`] projects a parsed raw scalar
//! forward into an [`ObjectBuilder`] field (used while parsing); a reverse
//! direction projects a document field back out to bytes (used while
//! printing, see [`Binder::bind_reverse`]).

use crate::builder::ObjectBuilder;
use crate::pointer::{evaluate, Pointer};
use crate::value::Value;

/// Text decoding applied by [`Binder::String`]. Only UTF-8 is specified
/// today; the variant exists so a future charset doesn't change the enum
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
}

/// A raw value as it arrives at a binder, before it is known which target
/// type (if any) it will coerce into. Parser captures always arrive as
/// `Bytes`; `Bool`/`Int`/`Long`/`Float`/`Double` exist for callers handing a
/// binder an already-typed scalar (e.g. a computed facility/severity pair).
#[derive(Debug, Clone, Copy)]
pub enum RawScalar<'a> {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a [u8]> for RawScalar<'a> {
    fn from(b: &'a [u8]) -> Self {
        RawScalar::Bytes(b)
    }
}

impl<'a> From<&'a str> for RawScalar<'a> {
    fn from(s: &'a str) -> Self {
        RawScalar::Str(s)
    }
}

/// A named, typed projector for one document field (spec §4.3).
///
/// `None` is an inert sentinel: it always rejects, used to skip optional
/// capture groups without wiring up a real field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binder {
    None,
    String { key: String, charset: Charset },
    Bytes { key: String },
    Int { key: String },
    Long { key: String },
    Float { key: String },
    Double { key: String },
}

impl Binder {
    pub fn string(key: impl Into<String>) -> Binder {
        Binder::String { key: key.into(), charset: Charset::Utf8 }
    }

    pub fn bytes(key: impl Into<String>) -> Binder {
        Binder::Bytes { key: key.into() }
    }

    pub fn int(key: impl Into<String>) -> Binder {
        Binder::Int { key: key.into() }
    }

    pub fn long(key: impl Into<String>) -> Binder {
        Binder::Long { key: key.into() }
    }

    pub fn float(key: impl Into<String>) -> Binder {
        Binder::Float { key: key.into() }
    }

    pub fn double(key: impl Into<String>) -> Binder {
        Binder::Double { key: key.into() }
    }

    pub(crate) fn key(&self) -> Option<&str> {
        match self {
            Binder::None => None,
            Binder::String { key, .. }
            | Binder::Bytes { key }
            | Binder::Int { key }
            | Binder::Long { key }
            | Binder::Float { key }
            | Binder::Double { key } => Some(key),
        }
    }

    /// Forward contract: parse/convert `raw` per this binder's type and, on
    /// success, write it under `key` into `builder`. No side effects on
    /// failure.
    pub fn bind(&self, builder: &mut ObjectBuilder, raw: RawScalar) -> bool {
        matches!(self.bind_checked(builder, raw), BindOutcome::Bound)
    }

    /// Like [`Binder::bind`] but distinguishes "the slice never looked like
    /// this type" from "it parsed but the target numeric type can't hold
    /// it" — the latter is what a caller building a [`crate::errors::
    /// ParseError`] reports as `Overflow` instead of `Malformed` (spec §7).
    pub(crate) fn bind_checked(&self, builder: &mut ObjectBuilder, raw: RawScalar) -> BindOutcome {
        let Some(key) = self.key() else { return BindOutcome::Rejected };
        match self {
            Binder::None => BindOutcome::Rejected,
            Binder::String { charset, .. } => match coerce_string(raw, *charset) {
                Some(s) => {
                    builder.put(key, Value::String(s));
                    BindOutcome::Bound
                }
                None => BindOutcome::Rejected,
            },
            Binder::Bytes { .. } => match coerce_bytes(raw) {
                Some(b) => {
                    builder.put(key, Value::Bytes(b));
                    BindOutcome::Bound
                }
                None => BindOutcome::Rejected,
            },
            Binder::Int { .. } => match coerce_i64(raw) {
                None => overflow_fallback(raw),
                Some(n) => match i32::try_from(n) {
                    Ok(n) => {
                        builder.put(key, Value::Int(n));
                        BindOutcome::Bound
                    }
                    Err(_) => BindOutcome::Overflow,
                },
            },
            Binder::Long { .. } => match coerce_i64(raw) {
                Some(n) => {
                    builder.put(key, Value::Long(n));
                    BindOutcome::Bound
                }
                None => overflow_fallback(raw),
            },
            Binder::Float { .. } => match coerce_f64(raw) {
                Some(n) => {
                    builder.put(key, Value::Float(n as f32));
                    BindOutcome::Bound
                }
                None => BindOutcome::Rejected,
            },
            Binder::Double { .. } => match coerce_f64(raw) {
                Some(n) => {
                    builder.put(key, Value::Double(n));
                    BindOutcome::Bound
                }
                None => BindOutcome::Rejected,
            },
        }
    }

    /// Reverse contract: evaluate `Root / key` in `doc`; if present and
    /// type-matches this binder exactly, run `pre` (typically emits a wire
    /// separator) and append the canonical textual form to `out`. `pre`
    /// never runs on a miss.
    pub fn bind_reverse(&self, out: &mut Vec<u8>, doc: &Value, pre: impl FnOnce(&mut Vec<u8>)) -> bool {
        let Some(key) = self.key() else { return false };
        let Some(value) = evaluate(doc, &(&Pointer::root() / key)) else { return false };
        match (self, value) {
            (Binder::String { .. }, Value::String(s)) => {
                pre(out);
                out.extend_from_slice(s.as_bytes());
                true
            }
            (Binder::Bytes { .. }, Value::Bytes(b)) => {
                pre(out);
                out.extend_from_slice(b);
                true
            }
            (Binder::Int { .. }, Value::Int(n)) => {
                pre(out);
                out.extend_from_slice(n.to_string().as_bytes());
                true
            }
            (Binder::Long { .. }, Value::Long(n)) => {
                pre(out);
                out.extend_from_slice(n.to_string().as_bytes());
                true
            }
            (Binder::Float { .. }, Value::Float(n)) => {
                pre(out);
                out.extend_from_slice(crate::json::format::format_f32(*n).as_bytes());
                true
            }
            (Binder::Double { .. }, Value::Double(n)) => {
                pre(out);
                out.extend_from_slice(crate::json::format::format_f64(*n).as_bytes());
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BindOutcome {
    Bound,
    Rejected,
    Overflow,
}

fn coerce_string(raw: RawScalar, charset: Charset) -> Option<String> {
    match (raw, charset) {
        (RawScalar::Str(s), _) => Some(s.to_string()),
        (RawScalar::Bytes(b), Charset::Utf8) => std::str::from_utf8(b).ok().map(str::to_string),
        _ => None,
    }
}

/// "BytesBinder wraps strings as UTF-8 byte sequences" (spec §4.3).
fn coerce_bytes(raw: RawScalar) -> Option<Vec<u8>> {
    match raw {
        RawScalar::Bytes(b) => Some(b.to_vec()),
        RawScalar::Str(s) => Some(s.as_bytes().to_vec()),
        _ => None,
    }
}

/// "boolean true/false map to 1/0 for numeric binders" (spec §4.3).
fn coerce_i64(raw: RawScalar) -> Option<i64> {
    match raw {
        RawScalar::Bool(b) => Some(i64::from(b)),
        RawScalar::Int(n) => Some(i64::from(n)),
        RawScalar::Long(n) => Some(n),
        RawScalar::Str(s) => s.trim().parse().ok(),
        RawScalar::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse().ok(),
        RawScalar::Float(_) | RawScalar::Double(_) => None,
    }
}

/// Distinguishes "parses as a number but doesn't fit `i64`/the target type"
/// (`Overflow`) from "never looked like a number at all" (`Rejected`), for
/// callers whose `coerce_i64` already failed.
fn overflow_fallback(raw: RawScalar) -> BindOutcome {
    let text = match raw {
        RawScalar::Str(s) => Some(s.trim()),
        RawScalar::Bytes(b) => std::str::from_utf8(b).ok().map(str::trim),
        _ => None,
    };
    match text.map(|s| s.parse::<i128>()) {
        Some(Ok(_)) => BindOutcome::Overflow,
        _ => BindOutcome::Rejected,
    }
}

fn coerce_f64(raw: RawScalar) -> Option<f64> {
    match raw {
        RawScalar::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        RawScalar::Int(n) => Some(f64::from(n)),
        RawScalar::Long(n) => Some(n as f64),
        RawScalar::Float(n) => Some(f64::from(n)),
        RawScalar::Double(n) => Some(n),
        RawScalar::Str(s) => s.trim().parse().ok(),
        RawScalar::Bytes(b) => std::str::from_utf8(b).ok()?.trim().parse().ok(),
    }
}
