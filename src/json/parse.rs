//! RFC 8259 JSON parsing, built entirely from [`crate::parser`] (spec §4.2).

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::builder::{ArrayBuilder, ObjectBuilder};
use crate::errors::ParseError;
use crate::parser::{self, Cursor};
use crate::value::Value;

/// Parse a complete JSON document. Trailing non-whitespace bytes after the
/// top-level value are malformed — the JSON grammar is one of the cases
/// §4.1 calls out as explicitly terminating at end-of-input.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    let bytes = input.as_ref();
    let mut c = Cursor::new(bytes);
    skip_ws(&mut c);
    let value = match parse_value(&mut c) {
        Some(v) => v,
        None => {
            log::debug!(
                "json parse failed at byte {}: {}",
                c.pos(),
                crate::parser::byte_window(bytes, c.pos())
            );
            return Err(ParseError::malformed(c.pos()));
        }
    };
    skip_ws(&mut c);
    if !c.is_at_end() {
        log::debug!(
            "json parse failed at byte {}: trailing bytes, {}",
            c.pos(),
            crate::parser::byte_window(bytes, c.pos())
        );
        return Err(ParseError::malformed(c.pos()));
    }
    Ok(value)
}

fn skip_ws(c: &mut Cursor) {
    parser::times(c, |c: &mut Cursor| parser::any_of(c, b" \t\n\r"), 0, usize::MAX);
}

fn parse_value(c: &mut Cursor) -> Option<Value> {
    skip_ws(c);
    let value = match c.peek()? {
        b'{' => parse_object(c)?,
        b'[' => parse_array(c)?,
        b'"' => Value::String(parse_string(c)?),
        b't' => {
            if parser::literal(c, b"true") {
                Value::Bool(true)
            } else {
                return None;
            }
        }
        b'f' => {
            if parser::literal(c, b"false") {
                Value::Bool(false)
            } else {
                return None;
            }
        }
        b'n' => {
            if parser::literal(c, b"null") {
                Value::Null
            } else {
                return None;
            }
        }
        b'-' | b'0'..=b'9' => parse_number(c)?,
        _ => return None,
    };
    Some(value)
}

fn parse_object(c: &mut Cursor) -> Option<Value> {
    if !parser::ch(c, b'{') {
        return None;
    }
    let mut builder = ObjectBuilder::new();
    skip_ws(c);
    if parser::ch(c, b'}') {
        return Some(builder.result());
    }
    loop {
        skip_ws(c);
        let key = parse_string(c)?;
        skip_ws(c);
        if !parser::ch(c, b':') {
            return None;
        }
        let value = parse_value(c)?;
        builder.put(key, value);
        skip_ws(c);
        if parser::ch(c, b',') {
            continue;
        }
        if parser::ch(c, b'}') {
            return Some(builder.result());
        }
        return None;
    }
}

fn parse_array(c: &mut Cursor) -> Option<Value> {
    if !parser::ch(c, b'[') {
        return None;
    }
    let mut builder = ArrayBuilder::new();
    skip_ws(c);
    if parser::ch(c, b']') {
        return Some(builder.result());
    }
    loop {
        let value = parse_value(c)?;
        builder.add(value);
        skip_ws(c);
        if parser::ch(c, b',') {
            continue;
        }
        if parser::ch(c, b']') {
            return Some(builder.result());
        }
        return None;
    }
}

/// Integer part: `0`, or a non-zero digit followed by any number of digits
/// (no leading zeros, per RFC 8259).
fn int_part(c: &mut Cursor) -> bool {
    crate::alt!(
        c,
        |c: &mut Cursor| parser::ch(c, b'0'),
        |c: &mut Cursor| crate::seq!(
            c,
            |c: &mut Cursor| parser::range(c, b'1', b'9'),
            |c: &mut Cursor| parser::times(c, |c: &mut Cursor| parser::range(c, b'0', b'9'), 0, usize::MAX)
        )
    )
}

fn fraction(c: &mut Cursor) -> bool {
    crate::seq!(
        c,
        |c: &mut Cursor| parser::ch(c, b'.'),
        |c: &mut Cursor| parser::times(c, |c: &mut Cursor| parser::range(c, b'0', b'9'), 1, usize::MAX)
    )
}

fn exponent(c: &mut Cursor) -> bool {
    crate::seq!(
        c,
        |c: &mut Cursor| parser::any_of(c, b"eE"),
        |c: &mut Cursor| {
            parser::opt(c, |c: &mut Cursor| parser::any_of(c, b"+-"));
            true
        },
        |c: &mut Cursor| parser::times(c, |c: &mut Cursor| parser::range(c, b'0', b'9'), 1, usize::MAX)
    )
}

fn number_token(c: &mut Cursor) -> bool {
    crate::seq!(
        c,
        |c: &mut Cursor| {
            parser::opt(c, |c: &mut Cursor| parser::ch(c, b'-'));
            true
        },
        |c: &mut Cursor| int_part(c),
        |c: &mut Cursor| {
            parser::opt(c, |c: &mut Cursor| fraction(c));
            true
        },
        |c: &mut Cursor| {
            parser::opt(c, |c: &mut Cursor| exponent(c));
            true
        }
    )
}

/// Integers fitting 32 bits become `Int`, then `Long`, then `BigDecimal`;
/// anything with a fraction or exponent becomes `BigDecimal` outright to
/// avoid precision loss (spec §4.2).
fn parse_number(c: &mut Cursor) -> Option<Value> {
    let slice = parser::capture(c, number_token)?;
    let text = std::str::from_utf8(slice).ok()?;
    let has_frac_or_exp = slice.iter().any(|&b| matches!(b, b'.' | b'e' | b'E'));
    if has_frac_or_exp {
        return BigDecimal::from_str(text).ok().map(Value::BigDecimal);
    }
    if let Ok(n) = text.parse::<i32>() {
        return Some(Value::Int(n));
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Long(n));
    }
    BigDecimal::from_str(text).ok().map(Value::BigDecimal)
}

fn parse_string(c: &mut Cursor) -> Option<String> {
    if !parser::ch(c, b'"') {
        return None;
    }
    let mut s = String::new();
    loop {
        let b = c.peek()?;
        match b {
            b'"' => {
                c.advance();
                return Some(s);
            }
            b'\\' => {
                c.advance();
                let esc = c.advance()?;
                match esc {
                    b'"' => s.push('"'),
                    b'\\' => s.push('\\'),
                    b'/' => s.push('/'),
                    b'b' => s.push('\u{8}'),
                    b'f' => s.push('\u{c}'),
                    b'n' => s.push('\n'),
                    b'r' => s.push('\r'),
                    b't' => s.push('\t'),
                    b'u' => s.push(parse_unicode_escape(c)?),
                    _ => return None,
                }
            }
            0x00..=0x1F => return None,
            _ => {
                let start = c.pos();
                let len = utf8_len(b)?;
                c.skip(len);
                let piece = std::str::from_utf8(&c.input()[start..c.pos()]).ok()?;
                s.push_str(piece);
            }
        }
    }
}

/// Decodes `\uXXXX`, combining a high/low surrogate pair into one code point
/// above the BMP when present (spec §4.2).
fn parse_unicode_escape(c: &mut Cursor) -> Option<char> {
    let high = parse_hex4(c)?;
    if (0xD800..=0xDBFF).contains(&high) {
        if !(parser::ch(c, b'\\') && parser::ch(c, b'u')) {
            return None;
        }
        let low = parse_hex4(c)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return None;
        }
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined);
    }
    if (0xDC00..=0xDFFF).contains(&high) {
        return None;
    }
    char::from_u32(high)
}

fn parse_hex4(c: &mut Cursor) -> Option<u32> {
    let mut v: u32 = 0;
    for _ in 0..4 {
        let b = c.advance()?;
        let d = (b as char).to_digit(16)?;
        v = v * 16 + d;
    }
    Some(v)
}

fn utf8_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
