//! Canonical numeric formatting and the JSON stringifier (spec §4.2).

use bigdecimal::BigDecimal;
use num_bigint::Sign;

use crate::value::{Fields, Value};

pub(crate) fn stringify(value: &Value, pretty: bool) -> Vec<u8> {
    let mut out = String::with_capacity(value.size_hint());
    write_value(value, pretty, 0, &mut out);
    out.into_bytes()
}

fn write_value(value: &Value, pretty: bool, indent: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Long(n) => out.push_str(&n.to_string()),
        Value::Float(n) => out.push_str(&format_f32(*n)),
        Value::Double(n) => out.push_str(&format_f64(*n)),
        Value::BigDecimal(n) => out.push_str(&format_bigdecimal(n)),
        Value::String(s) => write_json_string(s, out),
        Value::Bytes(b) => {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(b);
            write_json_string(&encoded, out);
        }
        Value::Array(items) => write_array(items, pretty, indent, out),
        Value::Object(fields) => write_object(fields, pretty, indent, out),
    }
}

fn write_array(items: &[Value], pretty: bool, indent: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if pretty {
            out.push('\n');
            push_indent(out, indent + 1);
        }
        write_value(item, pretty, indent + 1, out);
    }
    if pretty {
        out.push('\n');
        push_indent(out, indent);
    }
    out.push(']');
}

fn write_object(fields: &Fields, pretty: bool, indent: usize, out: &mut String) {
    if fields.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    for (i, (k, v)) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if pretty {
            out.push('\n');
            push_indent(out, indent + 1);
        }
        write_json_string(k, out);
        out.push(':');
        if pretty {
            out.push(' ');
        }
        write_value(v, pretty, indent + 1, out);
    }
    if pretty {
        out.push('\n');
        push_indent(out, indent);
    }
    out.push('}');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}

fn write_json_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Rust's `{:?}` float formatting already yields the shortest round-trip
/// decimal and always keeps a decimal point; `normalize` is a safety net in
/// case that ever isn't true for some input.
pub fn format_f32(n: f32) -> String {
    normalize_float(format!("{n:?}"))
}

pub fn format_f64(n: f64) -> String {
    normalize_float(format!("{n:?}"))
}

fn normalize_float(s: String) -> String {
    if s.contains(['.', 'e', 'E']) || s.contains("inf") || s.contains("NaN") {
        s
    } else {
        format!("{s}.0")
    }
}

/// Plain decimal, except when the value's base-10 exponent exceeds its own
/// significant-digit count in magnitude, in which case `E+`/`E-` scientific
/// notation is used instead (spec §4.2, confirmed against scenario S1:
/// `2e128` stringifies as `2E+128`).
pub fn format_bigdecimal(n: &BigDecimal) -> String {
    let (unscaled, scale) = n.as_bigint_and_exponent();
    let negative = unscaled.sign() == Sign::Minus;
    let digits = unscaled.magnitude().to_str_radix(10);
    let digit_count = digits.len() as i64;
    let exponent = digit_count - 1 - scale;

    if exponent.abs() > digit_count {
        let mut mantissa = String::new();
        mantissa.push_str(&digits[0..1]);
        if digits.len() > 1 {
            mantissa.push('.');
            mantissa.push_str(&digits[1..]);
        }
        let sign = if negative { "-" } else { "" };
        let exp_sign = if exponent >= 0 { "+" } else { "-" };
        format!("{sign}{mantissa}E{exp_sign}{}", exponent.abs())
    } else {
        plain_decimal(negative, &digits, scale)
    }
}

fn plain_decimal(negative: bool, digits: &str, scale: i64) -> String {
    let sign = if negative { "-" } else { "" };
    if scale <= 0 {
        format!("{sign}{digits}{}", "0".repeat((-scale) as usize))
    } else {
        let scale = scale as usize;
        if scale >= digits.len() {
            format!("{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
        } else {
            let split = digits.len() - scale;
            format!("{sign}{}.{}", &digits[..split], &digits[split..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn float_always_has_fractional_digit() {
        assert_eq!(format_f64(1.0), "1.0");
        assert_eq!(format_f32(1.0), "1.0");
    }

    #[test]
    fn big_decimal_scientific_matches_s1() {
        let n = BigDecimal::from_str("2e128").unwrap();
        assert_eq!(format_bigdecimal(&n), "2E+128");
    }

    #[test]
    fn big_decimal_plain_for_small_exponent() {
        let n = BigDecimal::from_str("123.456").unwrap();
        assert_eq!(format_bigdecimal(&n), "123.456");
    }

    #[test]
    fn big_decimal_zero_is_plain_zero() {
        let n = BigDecimal::from_str("0").unwrap();
        assert_eq!(format_bigdecimal(&n), "0");
    }

    #[test]
    fn big_decimal_negative_scientific() {
        let n = BigDecimal::from_str("-5e20").unwrap();
        assert_eq!(format_bigdecimal(&n), "-5E+20");
    }
}
