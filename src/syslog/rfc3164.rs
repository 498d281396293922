//! RFC 3164 (BSD) syslog: parse and print (spec §4.4.2, §4.4.3).

use crate::binder::{Binder, RawScalar};
use crate::builder::ObjectBuilder;
use crate::errors::ParseError;
use crate::parser::{self, Cursor};
use crate::pointer::{evaluate, Pointer};
use crate::value::Value;

use super::common::{apply_binder, expect_sp, is_alnum, is_alpha, is_digit, parse_pri, Rfc3164Binding};

/// `<PRI> TIMESTAMP SP HOSTNAME SP TAG[PID]: MSG` (spec §4.4.2). No NILVALUE,
/// no mode knob.
pub fn parse_rfc3164(input: &[u8], binding: &Rfc3164Binding) -> Result<Value, ParseError> {
    parse_rfc3164_inner(input, binding).map_err(|e| {
        log::debug!("rfc3164 parse failed at byte {}: {}", e.offset, parser::byte_window(input, e.offset));
        e
    })
}

fn parse_rfc3164_inner(input: &[u8], binding: &Rfc3164Binding) -> Result<Value, ParseError> {
    let mut c = Cursor::new(input);
    let mut builder = ObjectBuilder::new();

    let pri = parse_pri(&mut c).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_binder(&binding.facility, &mut builder, RawScalar::Int(i32::from(pri / 8)), c.pos())?;
    apply_binder(&binding.severity, &mut builder, RawScalar::Int(i32::from(pri % 8)), c.pos())?;

    let timestamp = parser::capture(&mut c, timestamp_token).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_binder(&binding.timestamp, &mut builder, RawScalar::Bytes(timestamp), c.pos())?;
    expect_sp(&mut c)?;

    let hostname = parser::capture(&mut c, |c: &mut Cursor| {
        parser::times(c, |c: &mut Cursor| parser::range(c, 33, 126), 1, usize::MAX)
    })
    .ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_binder(&binding.hostname, &mut builder, RawScalar::Bytes(hostname), c.pos())?;
    expect_sp(&mut c)?;

    let (tag, pid) = parse_tag_and_pid(&mut c).ok_or_else(|| ParseError::malformed(c.pos()))?;
    apply_binder(&binding.tag, &mut builder, RawScalar::Bytes(tag), c.pos())?;
    if let Some(pid) = pid {
        apply_binder(&binding.proc_id, &mut builder, RawScalar::Bytes(pid), c.pos())?;
    }

    parser::opt(&mut c, |c: &mut Cursor| parser::ch(c, b' '));
    let msg = c.remaining();
    if !msg.is_empty() {
        apply_binder(&binding.message, &mut builder, RawScalar::Bytes(msg), c.pos())?;
    }

    Ok(builder.result())
}

/// Fixed-width `Mmm dd hh:mm:ss`; single-digit days are space-padded
/// (`"Oct  1"`).
fn timestamp_token(c: &mut Cursor) -> bool {
    crate::seq!(
        c,
        |c: &mut Cursor| parser::times(c, is_alpha, 3, 3),
        |c: &mut Cursor| parser::ch(c, b' '),
        day_field,
        |c: &mut Cursor| parser::ch(c, b' '),
        time_field
    )
}

fn day_field(c: &mut Cursor) -> bool {
    crate::alt!(
        c,
        |c: &mut Cursor| crate::seq!(c, is_digit, is_digit),
        |c: &mut Cursor| crate::seq!(c, |c: &mut Cursor| parser::ch(c, b' '), is_digit)
    )
}

fn time_field(c: &mut Cursor) -> bool {
    crate::seq!(
        c,
        is_digit,
        is_digit,
        |c: &mut Cursor| parser::ch(c, b':'),
        is_digit,
        is_digit,
        |c: &mut Cursor| parser::ch(c, b':'),
        is_digit,
        is_digit
    )
}

fn parse_tag_and_pid<'a>(c: &mut Cursor<'a>) -> Option<(&'a [u8], Option<&'a [u8]>)> {
    let tag = parser::capture(c, |c: &mut Cursor| parser::times(c, is_alnum, 1, 32))?;
    let pid = if c.peek() == Some(b'[') {
        c.advance();
        let digits = parser::capture(c, |c: &mut Cursor| parser::times(c, is_digit, 1, usize::MAX))?;
        if !parser::ch(c, b']') {
            return None;
        }
        Some(digits)
    } else {
        None
    };
    if !parser::ch(c, b':') {
        return None;
    }
    Some((tag, pid))
}

/// Walks the fixed RFC 3164 field order. A missing field is skipped along
/// with its separator (spec §4.4.3) — there is no NILVALUE in this grammar.
pub fn print_rfc3164(value: &Value, binding: &Rfc3164Binding) -> Vec<u8> {
    let mut out = Vec::new();
    let facility = read_int_field(&binding.facility, value).unwrap_or(0);
    let severity = read_int_field(&binding.severity, value).unwrap_or(0);
    out.push(b'<');
    out.extend_from_slice((facility * 8 + severity).to_string().as_bytes());
    out.push(b'>');

    if let Some(b) = &binding.timestamp {
        b.bind_reverse(&mut out, value, |_| {});
    }
    if let Some(b) = &binding.hostname {
        b.bind_reverse(&mut out, value, |out| out.push(b' '));
    }
    if let Some(b) = &binding.tag {
        if b.bind_reverse(&mut out, value, |out| out.push(b' ')) {
            if let Some(p) = &binding.proc_id {
                if p.bind_reverse(&mut out, value, |out| out.push(b'[')) {
                    out.push(b']');
                }
            }
            out.push(b':');
        }
    }
    if let Some(b) = &binding.message {
        b.bind_reverse(&mut out, value, |out| out.push(b' '));
    }
    out
}

fn read_int_field(binder: &Option<Binder>, doc: &Value) -> Option<i64> {
    let key = binder.as_ref()?.key()?;
    match evaluate(doc, &(&Pointer::root() / key))? {
        Value::Int(n) => Some(i64::from(*n)),
        Value::Long(n) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding_all() -> Rfc3164Binding {
        Rfc3164Binding {
            facility: Some(Binder::int("facility")),
            severity: Some(Binder::int("severity")),
            timestamp: Some(Binder::string("timestamp")),
            hostname: Some(Binder::string("hostname")),
            tag: Some(Binder::string("tag")),
            proc_id: Some(Binder::string("procId")),
            message: Some(Binder::string("message")),
        }
    }

    #[test]
    fn parses_classic_frame_with_pid() {
        let frame = b"<34>Oct 11 22:14:15 mymachine su[1234]: 'su root' failed for lonvick";
        let doc = parse_rfc3164(frame, &binding_all()).unwrap();
        let fields = doc.as_object().unwrap();
        assert_eq!(fields.get("facility"), Some(&Value::Int(4)));
        assert_eq!(fields.get("severity"), Some(&Value::Int(2)));
        assert_eq!(fields.get("timestamp"), Some(&Value::String("Oct 11 22:14:15".into())));
        assert_eq!(fields.get("hostname"), Some(&Value::String("mymachine".into())));
        assert_eq!(fields.get("tag"), Some(&Value::String("su".into())));
        assert_eq!(fields.get("procId"), Some(&Value::String("1234".into())));
        assert_eq!(fields.get("message"), Some(&Value::String("'su root' failed for lonvick".into())));
    }

    #[test]
    fn single_digit_day_is_space_padded() {
        let frame = b"<13>Oct  1 08:00:00 host app: hi";
        let doc = parse_rfc3164(frame, &binding_all()).unwrap();
        assert_eq!(
            doc.as_object().unwrap().get("timestamp"),
            Some(&Value::String("Oct  1 08:00:00".into()))
        );
    }

    #[test]
    fn tag_without_pid_omits_proc_id() {
        let frame = b"<13>Oct 11 22:14:15 host app: hi";
        let doc = parse_rfc3164(frame, &binding_all()).unwrap();
        assert_eq!(doc.as_object().unwrap().get("procId"), None);
    }

    #[test]
    fn print_skips_missing_field_and_its_separator() {
        let mut b = crate::builder::ObjectBuilder::new();
        b.put("facility", Value::Int(4));
        b.put("severity", Value::Int(2));
        b.put("tag", Value::String("su".into()));
        let doc = b.result();
        let printed = print_rfc3164(&doc, &binding_all());
        assert_eq!(printed, b"<34> su:");
    }
}
