//! # streamcore
//!
//! A document value model, a grammar-driven byte parser, an RFC 5424/3164
//! syslog codec, and a streaming transformer contract for a log/event
//! processing pipeline.
//!
//! The crate is split leaves-first: [`value`]/[`pointer`]/[`builder`]/
//! [`patch`]/[`merge`] define the document model; `parser` is the
//! grammar-agnostic combinator core both codecs are built from; [`json`]
//! and [`syslog`] are the two wire codecs; [`binder`] bridges a codec's
//! raw captures to named document fields; [`transformer`] is the unit of
//! pipeline computation everything else composes into.
//!
//! Every operation here is synchronous and single-threaded per stream: no
//! locks, no shared mutable state, no suspension points. Composing
//! transformers into a concurrent pipeline is the caller's job.

mod builder;
mod errors;
mod merge;
mod parser;
mod patch;
mod pointer;
mod value;

pub mod binder;
pub mod json;
pub mod syslog;
pub mod transformer;

pub use builder::{ArrayBuilder, ObjectBuilder};
pub use errors::{ParseError, ParseErrorKind, PatchError, PointerError, PointerErrorKind};
pub use merge::{deep_merge, merge};
pub use patch::{Patch, PatchOp};
pub use pointer::{evaluate, Pointer, Token};
pub use value::{Fields, Value};
