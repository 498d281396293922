//! Shallow and deep merge over `Value` trees (spec §3.5).

use crate::value::{Fields, Value};

/// Shallow merge: `b`'s top-level fields override `a`'s. Defined for two
/// `Object`s; for any other combination `b` simply wins, matching
/// `deep_merge`'s fallback rule at non-object nodes.
pub fn merge(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(af), Value::Object(bf)) => {
            let mut out = af.clone();
            for (k, v) in bf.iter() {
                out.put(k, v.clone());
            }
            Value::Object(out)
        }
        _ => b.clone(),
    }
}

/// Recursive merge: when both sides at a path are `Object` (or both
/// `Array`), merge recursively; otherwise `b`'s value wins outright — which
/// is also how a `Null` in `b` overrides a present value in `a` (`Null`
/// never matches the `Object`/`Array` recursion cases).
pub fn deep_merge(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(af), Value::Object(bf)) => Value::Object(deep_merge_fields(af, bf)),
        (Value::Array(ai), Value::Array(bi)) => Value::Array(deep_merge_arrays(ai, bi)),
        _ => b.clone(),
    }
}

fn deep_merge_fields(a: &Fields, b: &Fields) -> Fields {
    let mut out = a.clone();
    for (k, bv) in b.iter() {
        let merged = match out.get(k) {
            Some(av) => deep_merge(av, bv),
            None => bv.clone(),
        };
        out.put(k, merged);
    }
    out
}

/// Index-wise merge up to the shorter length, then the tail of whichever
/// array is longer is appended as-is (neither side's surplus elements have
/// anything to merge against).
fn deep_merge_arrays(a: &[Value], b: &[Value]) -> Vec<Value> {
    let common = a.len().min(b.len());
    let mut out: Vec<Value> = (0..common).map(|i| deep_merge(&a[i], &b[i])).collect();
    if a.len() > common {
        out.extend_from_slice(&a[common..]);
    } else if b.len() > common {
        out.extend_from_slice(&b[common..]);
    }
    out
}
