//! The document value tree (spec §3.1).
//!
//! `Value` owns its data — strings are `String`, byte arrays are `Vec<u8>`,
//! and containers hold owned children. Object fields are stored as
//! `Vec<(String, Value)>` rather than a hash map so insertion order is
//! preserved and observable via iteration, even though equality itself is
//! order-insensitive (spec §3.1).

use std::fmt;

use bigdecimal::BigDecimal;

use crate::patch::{self, Patch};
use crate::errors::PatchError;

/// A value in the document model. Six scalar cases plus `Array`/`Object`
/// (spec §3.1).
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigDecimal(BigDecimal),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(Fields),
}

/// Ordered key/value pairs backing `Value::Object`.
///
/// Insertion order is preserved (`iter()` walks it); equality ignores order
/// (spec §3.1). `put` overwrites an existing key in place, keeping its
/// original position — this mirrors upsert semantics most pipeline field
/// mutators expect.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: Vec<(String, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Fields { entries: Vec::new() }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert or overwrite `key`. Overwriting keeps the key's original
    /// insertion position.
    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn from_vec(entries: Vec<(String, Value)>) -> Self {
        Fields { entries }
    }

    pub fn into_vec(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;
    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl PartialEq for Fields {
    fn eq(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::BigDecimal(a), Value::BigDecimal(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            // Cross-variant comparisons (including cross-numeric-variant
            // comparisons, e.g. Int(1) vs Long(1)) are never equal.
            _ => false,
        }
    }
}

impl Value {
    pub fn object(fields: Fields) -> Value {
        Value::Object(fields)
    }

    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            Value::Object(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Exact byte length of `crate::json::stringify(self)` for values whose
    /// canonical form needs no JSON-escaping (spec §3.1). Strings/bytes that
    /// contain characters the JSON stringifier escapes will make this an
    /// under-count; the formula is specified literally by the document model
    /// spec and is not meant to special-case escaping.
    pub fn size_hint(&self) -> usize {
        match self {
            Value::Null => 4,
            Value::Bool(true) => 4,
            Value::Bool(false) => 5,
            Value::Int(n) => decimal_digits(*n as i64),
            Value::Long(n) => decimal_digits(*n),
            Value::Float(n) => crate::json::format::format_f32(*n).len(),
            Value::Double(n) => crate::json::format::format_f64(*n).len(),
            Value::BigDecimal(n) => crate::json::format::format_bigdecimal(n).len(),
            Value::String(s) => s.len() + 2,
            Value::Bytes(b) => {
                use base64::Engine;
                base64::engine::general_purpose::STANDARD.encode(b).len() + 2
            }
            Value::Array(items) => {
                let commas = items.len().saturating_sub(1);
                2 + commas + items.iter().map(Value::size_hint).sum::<usize>()
            }
            Value::Object(fields) => {
                let commas = fields.len().saturating_sub(1);
                // each member: "key":value  → quoted key (+2) plus ':'
                let members: usize = fields
                    .iter()
                    .map(|(k, v)| k.len() + 2 + 1 + v.size_hint())
                    .sum();
                2 + commas + members
            }
        }
    }

    /// Apply a sequence of patch operations atomically: either all succeed
    /// and the new value is returned, or none take effect (spec §3.4).
    pub fn patch(&self, ops: &Patch) -> Option<Value> {
        patch::apply(self, ops).ok()
    }

    /// Like [`Value::patch`] but surfaces the failure reason instead of
    /// collapsing it to `None`.
    pub fn patch_detailed(&self, ops: &Patch) -> Result<Value, PatchError> {
        patch::apply(self, ops)
    }
}

fn decimal_digits(n: i64) -> usize {
    let sign = usize::from(n < 0);
    let digits = if n == 0 {
        1
    } else {
        // unsigned_abs avoids i64::MIN overflow on negation.
        n.unsigned_abs().ilog10() as usize + 1
    };
    sign + digits
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = crate::json::stringify(self);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}
