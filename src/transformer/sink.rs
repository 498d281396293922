//! `document -> bytes`, wrapping a printer (spec §4.5).

use crate::value::Value;

use super::Transformer;

/// Wraps any `&Value -> Vec<u8>` printer (JSON or syslog) as a pipeline
/// stage. Printing never fails in this crate, so `apply` always returns
/// `Some`.
pub struct SinkTransformer<F> {
    print: F,
}

impl<F> SinkTransformer<F>
where
    F: Fn(&Value) -> Vec<u8>,
{
    pub fn new(print: F) -> Self {
        SinkTransformer { print }
    }
}

impl<F> Transformer for SinkTransformer<F>
where
    F: Fn(&Value) -> Vec<u8>,
{
    type Input = Value;
    type Output = Vec<u8>;

    fn apply(&self, input: Value) -> Option<Vec<u8>> {
        Some((self.print)(&input))
    }
}
