//! The streaming transformer contract (spec §4.5, §6): one element in, zero
//! or one element out, synchronous, never propagating a codec failure
//! upward (spec §5, §7).

mod simple;
mod sink;
mod source;

pub use simple::{json_deserialize, OnError, OnSuccess, OpOutcome, SimpleTransformer, SimpleTransformerConfig};
pub use sink::SinkTransformer;
pub use source::SourceTransformer;

/// The single operation every pipeline stage exposes.
pub trait Transformer {
    type Input;
    type Output;

    fn apply(&self, input: Self::Input) -> Option<Self::Output>;
}
