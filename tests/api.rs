//! Black-box tests over the public document-model and codec API: building
//! documents, patching them, merging them, and round-tripping them through
//! JSON.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use streamcore::{deep_merge, merge, ObjectBuilder, Patch, PatchOp, Pointer, Value};

fn obj(pairs: &[(&str, Value)]) -> Value {
    let mut b = ObjectBuilder::new();
    for (k, v) in pairs {
        b.put(*k, v.clone());
    }
    b.result()
}

#[test]
fn json_round_trip_preserves_every_scalar_kind() {
    let doc = obj(&[
        ("n", Value::Null),
        ("t", Value::Bool(true)),
        ("i", Value::Int(42)),
        ("l", Value::Long(9_000_000_000)),
        ("d", Value::Double(1.5)),
        ("bd", Value::BigDecimal(BigDecimal::from_str("2e128").unwrap())),
        ("s", Value::String("hello".into())),
        ("arr", Value::Array(vec![Value::Int(1), Value::Int(2)])),
    ]);
    let bytes = streamcore::json::stringify(&doc);
    let reparsed = streamcore::json::parse(&bytes).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn bytes_round_trip_as_base64_string() {
    let doc = obj(&[("raw", Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))]);
    let bytes = streamcore::json::stringify(&doc);
    let reparsed = streamcore::json::parse(&bytes).unwrap();
    // Bytes round-trips as a base64 String, not back to Value::Bytes.
    assert_eq!(
        reparsed.as_object().unwrap().get("raw"),
        Some(&Value::String("3q2+7w==".into()))
    );
}

#[test]
fn size_hint_matches_stringify_length_for_nested_documents() {
    let doc = obj(&[
        ("a", Value::Int(1)),
        ("b", Value::Array(vec![Value::Bool(true), Value::String("x".into())])),
        ("c", obj(&[("d", Value::Null)])),
    ]);
    assert_eq!(doc.size_hint(), streamcore::json::stringify(&doc).len());
}

#[test]
fn patch_apply_then_inverse_round_trips() {
    let v = obj(&[("a", Value::Int(1))]);
    let forward = Patch::new(vec![PatchOp::Replace { path: &Pointer::root() / "a", value: Value::Int(2) }]);
    let applied = v.patch(&forward).unwrap();
    let inverse = Patch::new(vec![PatchOp::Replace { path: &Pointer::root() / "a", value: Value::Int(1) }]);
    assert_eq!(applied.patch(&inverse).unwrap(), v);
}

#[test]
fn s5_patch_atomicity_discards_the_intermediate_add() {
    let v = obj(&[("a", Value::Int(1))]);
    let ops = Patch::new(vec![
        PatchOp::Add { path: &Pointer::root() / "b", value: Value::Int(2) },
        PatchOp::Replace { path: &Pointer::root() / "missing", value: Value::Int(3) },
    ]);
    assert_eq!(v.patch(&ops), None);
    // The original value is untouched — no trace of the discarded Add.
    assert_eq!(v.as_object().unwrap().get("b"), None);
}

#[test]
fn s6_deep_merge_precedence() {
    let a = obj(&[("x", obj(&[("a", Value::Int(1)), ("b", Value::Int(2))]))]);
    let b = obj(&[("x", obj(&[("b", Value::Int(3)), ("c", Value::Int(4))]))]);
    let expected = obj(&[("x", obj(&[("a", Value::Int(1)), ("b", Value::Int(3)), ("c", Value::Int(4))]))]);
    assert_eq!(deep_merge(&a, &b), expected);
}

#[test]
fn invariant_3_deep_merge_is_idempotent_on_empty_and_superset_of_b() {
    let a = obj(&[("x", Value::Int(1))]);
    let empty = obj(&[]);
    assert_eq!(deep_merge(&a, &empty), a);

    let b = obj(&[("y", Value::Int(2))]);
    let merged = deep_merge(&a, &b);
    assert_eq!(merged.as_object().unwrap().get("y"), Some(&Value::Int(2)));
}

#[test]
fn shallow_merge_overrides_only_top_level_fields() {
    let a = obj(&[("x", obj(&[("a", Value::Int(1))]))]);
    let b = obj(&[("x", obj(&[("b", Value::Int(2))]))]);
    assert_eq!(merge(&a, &b).as_object().unwrap().get("x"), Some(&obj(&[("b", Value::Int(2))])));
}

#[test]
fn invariant_5_evaluate_never_fabricates_a_value() {
    let v = obj(&[("a", Value::Array(vec![Value::Int(1)]))]);
    assert_eq!(streamcore::evaluate(&v, &(&(&Pointer::root() / "a") / 9)), None);
    assert_eq!(streamcore::evaluate(&v, &(&Pointer::root() / "missing")), None);
    assert_eq!(streamcore::evaluate(&v, &(&Pointer::root() / "a")), v.as_object().unwrap().get("a"));
}
