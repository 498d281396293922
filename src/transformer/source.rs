//! `bytes -> document`, wrapping a parser (spec §4.5).

use crate::errors::ParseError;
use crate::value::Value;

use super::Transformer;

/// Wraps any `bytes -> Result<Value, ParseError>` parser (JSON or syslog) as
/// a pipeline stage.
pub struct SourceTransformer<F> {
    parse: F,
}

impl<F> SourceTransformer<F>
where
    F: Fn(&[u8]) -> Result<Value, ParseError>,
{
    pub fn new(parse: F) -> Self {
        SourceTransformer { parse }
    }
}

impl<F> Transformer for SourceTransformer<F>
where
    F: Fn(&[u8]) -> Result<Value, ParseError>,
{
    type Input = Vec<u8>;
    type Output = Value;

    /// A frame that fails to parse is dropped rather than propagated (spec
    /// §7: the core never surfaces a codec failure as an exception).
    fn apply(&self, input: Vec<u8>) -> Option<Value> {
        (self.parse)(&input).ok()
    }
}
