//! Shared configuration and parse helpers for both syslog grammars (spec
//! §4.4).

use crate::binder::{BindOutcome, Binder, RawScalar};
use crate::builder::ObjectBuilder;
use crate::errors::ParseError;
use crate::parser::{self, Cursor};

/// RFC 5424's two per-field length-cap regimes (spec §4.4.1). RFC 3164 has
/// no mode knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Strict,
    Lenient,
}

impl Mode {
    pub(crate) fn hostname_cap(self) -> usize {
        255
    }

    pub(crate) fn app_name_cap(self) -> usize {
        match self {
            Mode::Strict => 48,
            Mode::Lenient => 96,
        }
    }

    pub(crate) fn proc_id_cap(self) -> usize {
        128
    }

    /// Lenient's 64 exceeds RFC 5424's mandated 32; treated as an
    /// intentional extension (spec §9), not a bug to fix.
    pub(crate) fn msg_id_cap(self) -> usize {
        match self {
            Mode::Strict => 32,
            Mode::Lenient => 64,
        }
    }
}

/// Binder assignment for each RFC 5424 field. `None` means "don't capture
/// this field into the document."
#[derive(Debug, Clone, Default)]
pub struct Rfc5424Binding {
    pub facility: Option<Binder>,
    pub severity: Option<Binder>,
    pub timestamp: Option<Binder>,
    pub hostname: Option<Binder>,
    pub app_name: Option<Binder>,
    pub proc_id: Option<Binder>,
    pub msg_id: Option<Binder>,
    pub struct_data: Option<Binder>,
    pub message: Option<Binder>,
}

#[derive(Debug, Clone)]
pub struct Rfc5424Config {
    pub mode: Mode,
    pub binding: Rfc5424Binding,
}

/// Binder assignment for each RFC 3164 field.
#[derive(Debug, Clone, Default)]
pub struct Rfc3164Binding {
    pub facility: Option<Binder>,
    pub severity: Option<Binder>,
    pub timestamp: Option<Binder>,
    pub hostname: Option<Binder>,
    pub tag: Option<Binder>,
    pub proc_id: Option<Binder>,
    pub message: Option<Binder>,
}

/// `<N>` where `N = facility*8 + severity`, `0 <= N <= 191` (spec §4.4.1,
/// shared by both grammars).
pub(crate) fn parse_pri(c: &mut Cursor) -> Option<u8> {
    if !parser::ch(c, b'<') {
        return None;
    }
    let digits = parser::capture(c, |c: &mut Cursor| {
        parser::times(c, |c: &mut Cursor| parser::range(c, b'0', b'9'), 1, 3)
    })?;
    if !parser::ch(c, b'>') {
        return None;
    }
    let n: u16 = std::str::from_utf8(digits).ok()?.parse().ok()?;
    if n > 191 {
        return None;
    }
    Some(n as u8)
}

pub(crate) fn expect_sp(c: &mut Cursor) -> Result<(), ParseError> {
    if parser::ch(c, b' ') {
        Ok(())
    } else {
        Err(ParseError::malformed(c.pos()))
    }
}

pub(crate) fn is_alpha(c: &mut Cursor) -> bool {
    match c.peek() {
        Some(b) if b.is_ascii_alphabetic() => {
            c.advance();
            true
        }
        _ => false,
    }
}

pub(crate) fn is_alnum(c: &mut Cursor) -> bool {
    match c.peek() {
        Some(b) if b.is_ascii_alphanumeric() => {
            c.advance();
            true
        }
        _ => false,
    }
}

pub(crate) fn is_digit(c: &mut Cursor) -> bool {
    parser::range(c, b'0', b'9')
}

/// Run the field's binder (if configured) against a captured raw slice,
/// translating a rejection into the right `ParseErrorKind` — a slice that
/// never looked like the target type is `Malformed`; one that parsed but
/// overflowed the target numeric type is `Overflow` (spec §7).
pub(crate) fn apply_binder(
    binder: &Option<Binder>,
    builder: &mut ObjectBuilder,
    raw: RawScalar,
    pos: usize,
) -> Result<(), ParseError> {
    let Some(binder) = binder else { return Ok(()) };
    match binder.bind_checked(builder, raw) {
        BindOutcome::Bound => Ok(()),
        BindOutcome::Rejected => Err(ParseError::malformed(pos)),
        BindOutcome::Overflow => Err(ParseError::overflow(pos)),
    }
}
