//! End-to-end scenarios and quantified properties exercised against concrete
//! representative inputs: the syslog and JSON codecs, and the transformer
//! contract's short-circuit/merge/total-function behavior.

use bigdecimal::BigDecimal;
use std::str::FromStr;

use streamcore::binder::Binder;
use streamcore::syslog::{parse_rfc5424, Mode, Rfc5424Binding, Rfc5424Config};
use streamcore::transformer::{json_deserialize, OnError, OnSuccess, SimpleTransformerConfig, Transformer};
use streamcore::{ObjectBuilder, Pointer, Value};

fn obj(pairs: &[(&str, Value)]) -> Value {
    let mut b = ObjectBuilder::new();
    for (k, v) in pairs {
        b.put(*k, v.clone());
    }
    b.result()
}

fn full_rfc5424_binding() -> Rfc5424Binding {
    Rfc5424Binding {
        facility: Some(Binder::int("facility")),
        severity: Some(Binder::int("severity")),
        timestamp: Some(Binder::string("timestamp")),
        hostname: Some(Binder::string("hostname")),
        app_name: Some(Binder::string("appName")),
        proc_id: Some(Binder::string("procId")),
        msg_id: Some(Binder::string("msgId")),
        struct_data: Some(Binder::string("structData")),
        message: Some(Binder::string("message")),
    }
}

#[test]
fn s1_json_round_trip_big_decimal() {
    let doc = streamcore::json::parse(br#"{"bd":2e128}"#).unwrap();
    assert_eq!(
        doc.as_object().unwrap().get("bd"),
        Some(&Value::BigDecimal(BigDecimal::from_str("2e128").unwrap()))
    );
    assert_eq!(streamcore::json::stringify(&doc), b"{\"bd\":2E+128}");
}

#[test]
fn s2_syslog_5424_strict_extracts_expected_fields() {
    let frame =
        b"<34>1 2003-10-11T22:14:15.003Z mymachine.example.com su - ID47 - BOM'su root' failed for lonvick on /dev/pts/8";
    let config = Rfc5424Config { mode: Mode::Strict, binding: full_rfc5424_binding() };
    let doc = parse_rfc5424(frame, &config).unwrap();
    let fields = doc.as_object().unwrap();
    assert_eq!(fields.get("facility"), Some(&Value::Int(4)));
    assert_eq!(fields.get("severity"), Some(&Value::Int(2)));
    assert_eq!(fields.get("hostname"), Some(&Value::String("mymachine.example.com".into())));
    assert_eq!(fields.get("appName"), Some(&Value::String("su".into())));
    assert_eq!(fields.get("procId"), None);
    assert_eq!(fields.get("msgId"), Some(&Value::String("ID47".into())));
}

#[test]
fn invariant_6_strict_accepted_frame_is_also_lenient_accepted_with_same_document() {
    let frame = b"<14>1 2021-01-01T00:00:00Z host app 1 msg1 - hello";
    let strict = Rfc5424Config { mode: Mode::Strict, binding: full_rfc5424_binding() };
    let lenient = Rfc5424Config { mode: Mode::Lenient, binding: full_rfc5424_binding() };
    assert_eq!(parse_rfc5424(frame, &strict).unwrap(), parse_rfc5424(frame, &lenient).unwrap());
}

#[test]
fn s3_deserialize_transformer_short_circuits_on_non_json_content() {
    let input = obj(&[("message", Value::String("foobar".into()))]);
    let t = json_deserialize(SimpleTransformerConfig {
        source: &Pointer::root() / "message",
        target: None,
        on_success: OnSuccess::Skip,
        on_error: OnError::Skip,
    });
    assert_eq!(t.apply(input.clone()), Some(input));
}

#[test]
fn s4_deserialize_transformer_merges_into_root() {
    let input = obj(&[("message", Value::String(r#"{"test":"foobar"}"#.into()))]);
    let t = json_deserialize(SimpleTransformerConfig {
        source: &Pointer::root() / "message",
        target: Some(Pointer::root()),
        on_success: OnSuccess::Skip,
        on_error: OnError::Skip,
    });
    let expected = obj(&[
        ("message", Value::String(r#"{"test":"foobar"}"#.into())),
        ("test", Value::String("foobar".into())),
    ]);
    assert_eq!(t.apply(input), Some(expected));
}

#[test]
fn invariant_7_on_error_skip_is_total_and_input_preserving() {
    let cases = [
        obj(&[]),
        obj(&[("message", Value::Null)]),
        obj(&[("message", Value::String(String::new()))]),
        obj(&[("message", Value::String("plain text".into()))]),
        obj(&[("message", Value::String("{totally broken}".into()))]),
        obj(&[("message", Value::Array(vec![Value::Int(1)]))]),
    ];
    for input in cases {
        let t = json_deserialize(SimpleTransformerConfig {
            source: &Pointer::root() / "message",
            target: None,
            on_success: OnSuccess::Skip,
            on_error: OnError::Skip,
        });
        assert_eq!(t.apply(input.clone()), Some(input));
    }
}
