//! RFC 5424 structured syslog: parse and print (spec §4.4.1, §4.4.3).

use crate::binder::{Binder, RawScalar};
use crate::builder::ObjectBuilder;
use crate::errors::ParseError;
use crate::parser::{self, Cursor};
use crate::pointer::{evaluate, Pointer};
use crate::value::Value;

use super::common::{apply_binder, expect_sp, parse_pri, Rfc5424Binding, Rfc5424Config};

/// `<PRI>VERSION SP TIMESTAMP SP HOSTNAME SP APP SP PROCID SP MSGID SP
/// STRUCTURED-DATA [SP MSG]` (spec §4.4.1). `-` is NILVALUE for any
/// mandatory field; a NIL field never invokes its binder.
pub fn parse_rfc5424(input: &[u8], config: &Rfc5424Config) -> Result<Value, ParseError> {
    parse_rfc5424_inner(input, config).map_err(|e| {
        log::debug!("rfc5424 parse failed at byte {}: {}", e.offset, parser::byte_window(input, e.offset));
        e
    })
}

fn parse_rfc5424_inner(input: &[u8], config: &Rfc5424Config) -> Result<Value, ParseError> {
    let mut c = Cursor::new(input);
    let mut builder = ObjectBuilder::new();
    let caps = config.mode;
    let binding = &config.binding;

    let pri = parse_pri(&mut c).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_binder(&binding.facility, &mut builder, RawScalar::Int(i32::from(pri / 8)), c.pos())?;
    apply_binder(&binding.severity, &mut builder, RawScalar::Int(i32::from(pri % 8)), c.pos())?;

    if !parser::ch(&mut c, b'1') {
        return Err(ParseError::malformed(c.pos()));
    }
    expect_sp(&mut c)?;

    let timestamp = parse_field(&mut c, usize::MAX).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_opt_field(&binding.timestamp, &mut builder, timestamp, c.pos())?;
    expect_sp(&mut c)?;

    let hostname = parse_field(&mut c, caps.hostname_cap()).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_opt_field(&binding.hostname, &mut builder, hostname, c.pos())?;
    expect_sp(&mut c)?;

    let app_name = parse_field(&mut c, caps.app_name_cap()).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_opt_field(&binding.app_name, &mut builder, app_name, c.pos())?;
    expect_sp(&mut c)?;

    let proc_id = parse_field(&mut c, caps.proc_id_cap()).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_opt_field(&binding.proc_id, &mut builder, proc_id, c.pos())?;
    expect_sp(&mut c)?;

    let msg_id = parse_field(&mut c, caps.msg_id_cap()).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_opt_field(&binding.msg_id, &mut builder, msg_id, c.pos())?;
    expect_sp(&mut c)?;

    let struct_data = parse_structured_data(&mut c).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_opt_field(&binding.struct_data, &mut builder, struct_data, c.pos())?;

    if parser::ch(&mut c, b' ') {
        let rest = c.remaining();
        if !rest.is_empty() {
            apply_binder(&binding.message, &mut builder, RawScalar::Bytes(rest), c.pos())?;
        }
        c.skip(rest.len());
    }

    Ok(builder.result())
}

fn apply_opt_field(
    binder: &Option<Binder>,
    builder: &mut ObjectBuilder,
    field: Option<&[u8]>,
    pos: usize,
) -> Result<(), ParseError> {
    match field {
        None => Ok(()),
        Some(slice) => apply_binder(binder, builder, RawScalar::Bytes(slice), pos),
    }
}

/// A `-` immediately followed by the field separator is NILVALUE; otherwise
/// captures a run of printable, non-space US-ASCII up to `max_len` bytes.
fn parse_field<'a>(c: &mut Cursor<'a>, max_len: usize) -> Option<Option<&'a [u8]>> {
    if c.peek() == Some(b'-') && c.peek_at(1) == Some(b' ') {
        c.advance();
        return Some(None);
    }
    let slice = parser::capture(c, |c: &mut Cursor| {
        parser::times(c, |c: &mut Cursor| parser::range(c, 33, 126), 1, usize::MAX)
    })?;
    if slice.len() > max_len {
        return None;
    }
    Some(Some(slice))
}

/// `-` for NIL, otherwise one or more bracketed `[id k="v" …]` groups
/// captured as a single raw slice (spec §4.4.1: "captures the raw sequence
/// as a single slice" — this crate does not parse SD-PARAM internals).
fn parse_structured_data<'a>(c: &mut Cursor<'a>) -> Option<Option<&'a [u8]>> {
    if c.peek() == Some(b'-') && c.peek_at(1) == Some(b' ') {
        c.advance();
        return Some(None);
    }
    if c.peek() != Some(b'[') {
        return None;
    }
    let slice = parser::capture(c, |c: &mut Cursor| {
        let mut matched = false;
        while c.peek() == Some(b'[') {
            if !parse_sd_element(c) {
                return matched;
            }
            matched = true;
        }
        matched
    })?;
    Some(Some(slice))
}

fn parse_sd_element(c: &mut Cursor) -> bool {
    let start = c.mark();
    if !parser::ch(c, b'[') {
        return false;
    }
    loop {
        match c.peek() {
            None => {
                c.reset(start);
                return false;
            }
            Some(b']') => {
                c.advance();
                return true;
            }
            Some(b'\\') => {
                c.advance();
                if c.advance().is_none() {
                    c.reset(start);
                    return false;
                }
            }
            Some(_) => {
                c.advance();
            }
        }
    }
}

/// Walks the fixed RFC 5424 field order, invoking each configured binder's
/// reverse contract. A missing field prints NILVALUE `-` (spec §4.4.3); the
/// printer never validates that `facility`/`severity` are in range.
pub fn print_rfc5424(value: &Value, binding: &Rfc5424Binding) -> Vec<u8> {
    let mut out = Vec::new();
    let facility = read_int_field(&binding.facility, value).unwrap_or(0);
    let severity = read_int_field(&binding.severity, value).unwrap_or(0);
    out.push(b'<');
    out.extend_from_slice((facility * 8 + severity).to_string().as_bytes());
    out.push(b'>');
    out.push(b'1');

    print_or_nil(&binding.timestamp, value, &mut out);
    print_or_nil(&binding.hostname, value, &mut out);
    print_or_nil(&binding.app_name, value, &mut out);
    print_or_nil(&binding.proc_id, value, &mut out);
    print_or_nil(&binding.msg_id, value, &mut out);
    print_or_nil(&binding.struct_data, value, &mut out);

    if let Some(b) = &binding.message {
        b.bind_reverse(&mut out, value, |out| out.push(b' '));
    }
    out
}

fn print_or_nil(binder: &Option<Binder>, doc: &Value, out: &mut Vec<u8>) {
    let printed = match binder {
        Some(b) => b.bind_reverse(out, doc, |out| out.push(b' ')),
        None => false,
    };
    if !printed {
        out.push(b' ');
        out.push(b'-');
    }
}

fn read_int_field(binder: &Option<Binder>, doc: &Value) -> Option<i64> {
    let key = binder.as_ref()?.key()?;
    match evaluate(doc, &(&Pointer::root() / key))? {
        Value::Int(n) => Some(i64::from(*n)),
        Value::Long(n) => Some(*n),
        _ => None,
    }
}
