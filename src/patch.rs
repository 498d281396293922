//! RFC 6902-style patch operations (spec §3.4).
//!
//! Application is all-or-nothing at the whole-patch granularity: each
//! operation rebuilds a new `Value` tree from the previous one, and the
//! first failure aborts before any later operation runs, discarding every
//! modification made so far (spec invariant: "an intermediate failure
//! discards all prior modifications").

use crate::errors::PatchError;
use crate::pointer::{evaluate, Pointer, Token};
use crate::value::Value;

/// One step of a patch.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Insert or overwrite the value at `path`.
    Add { path: Pointer, value: Value },
    /// Delete the value at `path`. A missing target is a no-op unless
    /// `must_exist` is set.
    Remove { path: Pointer, must_exist: bool },
    /// Overwrite the value at `path`; the target must already exist.
    Replace { path: Pointer, value: Value },
    /// Copy the value at `from` to `to` (Add semantics at `to`).
    Copy { from: Pointer, to: Pointer },
    /// Move the value at `from` to `to` (Copy then Remove at `from`).
    Move { from: Pointer, to: Pointer },
    /// Fail the whole patch unless the value at `path` equals `value`.
    Test { path: Pointer, value: Value },
    /// Apply a group of operations as a unit (still subject to the same
    /// whole-patch atomicity as any other step).
    Bulk(Vec<PatchOp>),
}

/// An ordered sequence of patch operations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Patch(pub Vec<PatchOp>);

impl Patch {
    pub fn new(ops: Vec<PatchOp>) -> Self {
        Patch(ops)
    }
}

impl FromIterator<PatchOp> for Patch {
    fn from_iter<T: IntoIterator<Item = PatchOp>>(iter: T) -> Self {
        Patch(iter.into_iter().collect())
    }
}

pub fn apply(value: &Value, patch: &Patch) -> Result<Value, PatchError> {
    apply_ops(value, &patch.0)
}

fn apply_ops(value: &Value, ops: &[PatchOp]) -> Result<Value, PatchError> {
    let mut current = value.clone();
    for op in ops {
        current = apply_one(&current, op)?;
    }
    Ok(current)
}

fn apply_one(value: &Value, op: &PatchOp) -> Result<Value, PatchError> {
    match op {
        PatchOp::Add { path, value: v } => set_at(value, path, v, false),
        PatchOp::Replace { path, value: v } => set_at(value, path, v, true),
        PatchOp::Remove { path, must_exist } => remove_at(value, path, *must_exist),
        PatchOp::Test { path, value: expected } => {
            match evaluate(value, path) {
                Some(actual) if actual == expected => Ok(value.clone()),
                _ => Err(PatchError::TestFailed { path: path.to_string() }),
            }
        }
        PatchOp::Copy { from, to } => {
            let v = evaluate(value, from)
                .ok_or_else(|| PatchError::Missing { path: from.to_string() })?
                .clone();
            set_at(value, to, &v, false)
        }
        PatchOp::Move { from, to } => {
            let v = evaluate(value, from)
                .ok_or_else(|| PatchError::Missing { path: from.to_string() })?
                .clone();
            let removed = remove_at(value, from, true)?;
            set_at(&removed, to, &v, false)
        }
        PatchOp::Bulk(ops) => apply_ops(value, ops),
    }
}

/// Insert (`require_exists = false`) or overwrite-only (`require_exists =
/// true`) `new_value` at `path`. Every token but the last must already
/// resolve to a container of the matching kind; the last token only needs
/// to resolve when `require_exists` is set.
fn set_at(root: &Value, path: &Pointer, new_value: &Value, require_exists: bool) -> Result<Value, PatchError> {
    set_rec(root, path.tokens(), new_value, require_exists, path)
}

fn set_rec(
    node: &Value,
    tokens: &[Token],
    new_value: &Value,
    require_exists: bool,
    full_path: &Pointer,
) -> Result<Value, PatchError> {
    let Some((first, rest)) = tokens.split_first() else {
        return Ok(new_value.clone());
    };

    if rest.is_empty() {
        return match (node, first) {
            (Value::Object(fields), Token::Name(key)) => {
                if require_exists && !fields.contains(key) {
                    return Err(PatchError::Missing { path: full_path.to_string() });
                }
                let mut fields = fields.clone();
                fields.put(key.clone(), new_value.clone());
                Ok(Value::Object(fields))
            }
            (Value::Array(items), Token::Index(idx)) => {
                if require_exists {
                    if *idx >= items.len() {
                        return Err(PatchError::Missing { path: full_path.to_string() });
                    }
                    let mut items = items.to_vec();
                    items[*idx] = new_value.clone();
                    Ok(Value::Array(items))
                } else {
                    if *idx > items.len() {
                        return Err(PatchError::Missing { path: full_path.to_string() });
                    }
                    let mut items = items.to_vec();
                    items.insert(*idx, new_value.clone());
                    Ok(Value::Array(items))
                }
            }
            _ => Err(PatchError::TypeMismatch { path: full_path.to_string() }),
        };
    }

    match (node, first) {
        (Value::Object(fields), Token::Name(key)) => {
            let child = fields
                .get(key)
                .ok_or_else(|| PatchError::Missing { path: full_path.to_string() })?;
            let new_child = set_rec(child, rest, new_value, require_exists, full_path)?;
            let mut fields = fields.clone();
            fields.put(key.clone(), new_child);
            Ok(Value::Object(fields))
        }
        (Value::Array(items), Token::Index(idx)) => {
            let child = items
                .get(*idx)
                .ok_or_else(|| PatchError::Missing { path: full_path.to_string() })?;
            let new_child = set_rec(child, rest, new_value, require_exists, full_path)?;
            let mut items = items.to_vec();
            items[*idx] = new_child;
            Ok(Value::Array(items))
        }
        _ => Err(PatchError::TypeMismatch { path: full_path.to_string() }),
    }
}

/// Delete the value at `path`. A missing target (any token along the path
/// fails to resolve) is a no-op unless `must_exist`.
fn remove_at(root: &Value, path: &Pointer, must_exist: bool) -> Result<Value, PatchError> {
    if evaluate(root, path).is_none() {
        return if must_exist {
            Err(PatchError::Missing { path: path.to_string() })
        } else {
            Ok(root.clone())
        };
    }
    // Path is known to fully resolve, so the recursive descent never needs
    // to handle "missing" itself.
    Ok(remove_rec(root, path.tokens()))
}

fn remove_rec(node: &Value, tokens: &[Token]) -> Value {
    let Some((first, rest)) = tokens.split_first() else {
        return node.clone();
    };
    if rest.is_empty() {
        return match (node, first) {
            (Value::Object(fields), Token::Name(key)) => {
                let mut fields = fields.clone();
                fields.remove(key);
                Value::Object(fields)
            }
            (Value::Array(items), Token::Index(idx)) => {
                let mut items = items.to_vec();
                items.remove(*idx);
                Value::Array(items)
            }
            _ => node.clone(),
        };
    }
    match (node, first) {
        (Value::Object(fields), Token::Name(key)) => {
            let Some(child) = fields.get(key) else { return node.clone() };
            let new_child = remove_rec(child, rest);
            let mut fields = fields.clone();
            fields.put(key.clone(), new_child);
            Value::Object(fields)
        }
        (Value::Array(items), Token::Index(idx)) => {
            let Some(child) = items.get(*idx) else { return node.clone() };
            let new_child = remove_rec(child, rest);
            let mut items = items.to_vec();
            items[*idx] = new_child;
            Value::Array(items)
        }
        _ => node.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ObjectBuilder;

    fn obj(pairs: &[(&str, Value)]) -> Value {
        let mut b = ObjectBuilder::new();
        for (k, v) in pairs {
            b.put(*k, v.clone());
        }
        b.result()
    }

    #[test]
    fn add_then_replace_missing_fails_atomically() {
        let v = obj(&[("a", Value::Int(1))]);
        let ops = Patch::new(vec![
            PatchOp::Add { path: &Pointer::root() / "b", value: Value::Int(2) },
            PatchOp::Replace { path: &Pointer::root() / "missing", value: Value::Int(3) },
        ]);
        assert_eq!(v.patch(&ops), None);
    }

    #[test]
    fn remove_missing_is_noop_when_not_required() {
        let v = obj(&[("a", Value::Int(1))]);
        let ops = Patch::new(vec![PatchOp::Remove {
            path: &Pointer::root() / "missing",
            must_exist: false,
        }]);
        assert_eq!(v.patch(&ops).unwrap(), v);
    }

    #[test]
    fn remove_missing_fails_when_required() {
        let v = obj(&[("a", Value::Int(1))]);
        let ops = Patch::new(vec![PatchOp::Remove {
            path: &Pointer::root() / "missing",
            must_exist: true,
        }]);
        assert_eq!(v.patch(&ops), None);
    }

    #[test]
    fn move_relocates_value() {
        let v = obj(&[("a", Value::Int(1))]);
        let ops = Patch::new(vec![PatchOp::Move {
            from: &Pointer::root() / "a",
            to: &Pointer::root() / "b",
        }]);
        let result = v.patch(&ops).unwrap();
        assert_eq!(result.as_object().unwrap().get("a"), None);
        assert_eq!(result.as_object().unwrap().get("b"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_op_disagreement_fails_whole_patch() {
        let v = obj(&[("a", Value::Int(1))]);
        let ops = Patch::new(vec![
            PatchOp::Add { path: &Pointer::root() / "b", value: Value::Int(99) },
            PatchOp::Test { path: &Pointer::root() / "a", value: Value::Int(2) },
        ]);
        assert_eq!(v.patch(&ops), None);
    }

    #[test]
    fn inverse_patch_round_trips() {
        let v = obj(&[("a", Value::Int(1))]);
        let forward = Patch::new(vec![PatchOp::Add {
            path: &Pointer::root() / "a",
            value: Value::Int(2),
        }]);
        let applied = v.patch(&forward).unwrap();
        let inverse = Patch::new(vec![PatchOp::Replace {
            path: &Pointer::root() / "a",
            value: Value::Int(1),
        }]);
        assert_eq!(applied.patch(&inverse).unwrap(), v);
    }
}
