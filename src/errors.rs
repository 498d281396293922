//! Error taxonomy (spec §7).
//!
//! Parsing and patch failures are values, never out-of-band control flow:
//! every fallible operation in this crate returns a `Result`/`Option`, and
//! nothing here ever panics on malformed input.

use std::fmt;

/// The two things that can go wrong while walking bytes against a grammar.
///
/// `Overflow` is raised by numeric binders (a captured slice parses but does
/// not fit the target numeric type), not by the parser core itself — the
/// parser core only ever raises `Malformed`/`EndOfInput`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Grammar violation: nothing at `offset` matches what was expected.
    Malformed,
    /// The cursor ran out of bytes before the grammar was satisfied.
    EndOfInput,
    /// A captured value does not fit its target numeric type.
    Overflow,
}

/// A parse failure at a specific byte offset.
///
/// Shared by the JSON and syslog codecs (spec §4.2: "a single error kind").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn malformed(offset: usize) -> Self {
        ParseError { kind: ParseErrorKind::Malformed, offset }
    }

    pub fn end_of_input(offset: usize) -> Self {
        ParseError { kind: ParseErrorKind::EndOfInput, offset }
    }

    pub fn overflow(offset: usize) -> Self {
        ParseError { kind: ParseErrorKind::Overflow, offset }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Malformed => write!(f, "malformed input at byte {}", self.offset),
            ParseErrorKind::EndOfInput => {
                write!(f, "unexpected end of input at byte {}", self.offset)
            }
            ParseErrorKind::Overflow => write!(f, "numeric overflow at byte {}", self.offset),
        }
    }
}

impl std::error::Error for ParseError {}

/// Reasons a `Patch` operation can fail against a `Value` tree (spec §3.4).
///
/// Crate-internal: the public `Value::patch` contract is `Option<Value>`
/// (spec §3.4 is explicit about this), so this type is only surfaced through
/// `Value::patch_detailed` for callers who want the reason.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    /// The value at `path` has the wrong variant for the requested operation.
    TypeMismatch { path: String },
    /// `path` does not exist but the operation requires it to.
    Missing { path: String },
    /// A `Test` operation's expected value did not match the actual value.
    TestFailed { path: String },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::TypeMismatch { path } => write!(f, "type mismatch at {path}"),
            PatchError::Missing { path } => write!(f, "missing path {path}"),
            PatchError::TestFailed { path } => write!(f, "test failed at {path}"),
        }
    }
}

impl std::error::Error for PatchError {}

/// The two ways an RFC 6901 pointer string can fail to parse (spec §3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerErrorKind {
    /// A non-empty pointer must start with `/`.
    MissingLeadingSlash,
    /// A `~` escape was not followed by `0` or `1`.
    InvalidEscape,
}

/// A pointer parse failure at a specific byte offset into the pointer
/// string, mirroring [`ParseError`]'s `kind`/`offset` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerError {
    pub kind: PointerErrorKind,
    pub offset: usize,
}

impl PointerError {
    pub fn missing_leading_slash(offset: usize) -> Self {
        PointerError { kind: PointerErrorKind::MissingLeadingSlash, offset }
    }

    pub fn invalid_escape(offset: usize) -> Self {
        PointerError { kind: PointerErrorKind::InvalidEscape, offset }
    }
}

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PointerErrorKind::MissingLeadingSlash => {
                write!(f, "pointer must start with '/' at byte {}", self.offset)
            }
            PointerErrorKind::InvalidEscape => write!(f, "invalid '~' escape at byte {}", self.offset),
        }
    }
}

impl std::error::Error for PointerError {}
