//! `document -> document`, operating on one field (spec §4.5).

use crate::patch::{Patch, PatchOp};
use crate::pointer::{evaluate, Pointer};
use crate::value::Value;

use super::Transformer;

/// After a successful write, leave `source` in place (`Skip`) or delete it
/// (`Remove`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnSuccess {
    #[default]
    Skip,
    Remove,
}

/// On an actual transform failure, pass the element through unchanged
/// (`Skip`) or drop it (`Discard`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    #[default]
    Skip,
    Discard,
}

#[derive(Debug, Clone, Default)]
pub struct SimpleTransformerConfig {
    pub source: Pointer,
    pub target: Option<Pointer>,
    pub on_success: OnSuccess,
    pub on_error: OnError,
}

/// What the field-level operation did with the value read from `source`.
/// Distinct from `OnError` because a fast skip (the value never looked like
/// something the operation applies to) bypasses the `on_error` policy
/// entirely — it is not a failure (spec §4.5).
pub enum OpOutcome {
    Applied(Value),
    FastSkip,
    Failed,
}

/// Operates on one field identified by `source`, writing the operation's
/// result at `target` (default = `source`).
pub struct SimpleTransformer<Op> {
    config: SimpleTransformerConfig,
    op: Op,
}

impl<Op> SimpleTransformer<Op>
where
    Op: Fn(&Value) -> OpOutcome,
{
    pub fn new(config: SimpleTransformerConfig, op: Op) -> Self {
        SimpleTransformer { config, op }
    }

    fn write_target(&self, input: &Value, new_value: Value) -> Option<Value> {
        let target = self.config.target.clone().unwrap_or_else(|| self.config.source.clone());
        if target.is_root() {
            if let Value::Object(_) = &new_value {
                return Some(crate::merge::merge(input, &new_value));
            }
        }
        let patch = Patch::new(vec![PatchOp::Add { path: target, value: new_value }]);
        input.patch(&patch)
    }
}

impl<Op> Transformer for SimpleTransformer<Op>
where
    Op: Fn(&Value) -> OpOutcome,
{
    type Input = Value;
    type Output = Value;

    fn apply(&self, input: Value) -> Option<Value> {
        let Some(source_val) = evaluate(&input, &self.config.source) else {
            return Some(input);
        };
        if is_empty_scalar(source_val) {
            return Some(input);
        }

        match (self.op)(source_val) {
            OpOutcome::FastSkip => Some(input),
            OpOutcome::Failed => self.on_failure(input),
            OpOutcome::Applied(new_value) => match self.write_target(&input, new_value) {
                Some(written) => Some(match self.config.on_success {
                    OnSuccess::Skip => written,
                    OnSuccess::Remove => remove_source(written, &self.config.source),
                }),
                None => self.on_failure(input),
            },
        }
    }
}

impl<Op> SimpleTransformer<Op>
where
    Op: Fn(&Value) -> OpOutcome,
{
    fn on_failure(&self, input: Value) -> Option<Value> {
        match self.config.on_error {
            OnError::Skip => Some(input),
            OnError::Discard => {
                log::warn!("simple transformer discarding element at {}", self.config.source);
                None
            }
        }
    }
}

fn is_empty_scalar(v: &Value) -> bool {
    matches!(v, Value::String(s) if s.is_empty()) || matches!(v, Value::Bytes(b) if b.is_empty())
}

fn remove_source(value: Value, source: &Pointer) -> Value {
    let patch = Patch::new(vec![PatchOp::Remove { path: source.clone(), must_exist: false }]);
    value.patch(&patch).unwrap_or(value)
}

/// The `mode=Deserialize` operation: parse `source`'s string/bytes content as
/// JSON, fast-skipping content that doesn't syntactically look like an
/// object (first non-space byte not `{`, last not `}`) without treating that
/// as a failure (spec §4.5, §9 open question).
pub fn json_deserialize(config: SimpleTransformerConfig) -> SimpleTransformer<impl Fn(&Value) -> OpOutcome> {
    SimpleTransformer::new(config, |value: &Value| {
        let bytes: &[u8] = match value {
            Value::String(s) => s.as_bytes(),
            Value::Bytes(b) => b,
            _ => return OpOutcome::Failed,
        };
        let trimmed = trim_ascii_ws(bytes);
        if trimmed.first() != Some(&b'{') || trimmed.last() != Some(&b'}') {
            return OpOutcome::FastSkip;
        }
        match crate::json::parse(bytes) {
            Ok(parsed) => OpOutcome::Applied(parsed),
            Err(_) => OpOutcome::Failed,
        }
    })
}

fn trim_ascii_ws(b: &[u8]) -> &[u8] {
    let start = b.iter().position(|c| !c.is_ascii_whitespace()).unwrap_or(b.len());
    let end = b.iter().rposition(|c| !c.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &b[start..end]
}
