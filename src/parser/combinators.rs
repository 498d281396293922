//! The combinator set driving both the JSON and syslog grammars (spec
//! §4.1). Every combinator is deterministic: failure rewinds the cursor,
//! success advances it, and an outer parser succeeding does not require it
//! to have consumed all input.

use super::cursor::Cursor;

/// Match and consume exactly one byte `b`.
pub fn ch(c: &mut Cursor, b: u8) -> bool {
    if c.peek() == Some(b) {
        c.advance();
        true
    } else {
        false
    }
}

/// Match and consume one byte that is a member of `set`.
pub fn any_of(c: &mut Cursor, set: &[u8]) -> bool {
    match c.peek() {
        Some(b) if set.contains(&b) => {
            c.advance();
            true
        }
        _ => false,
    }
}

/// Match and consume one byte that is *not* a member of `set` (and not
/// end-of-input).
pub fn none_of(c: &mut Cursor, set: &[u8]) -> bool {
    match c.peek() {
        Some(b) if !set.contains(&b) => {
            c.advance();
            true
        }
        _ => false,
    }
}

/// Match and consume one byte in the inclusive range `lo..=hi`.
pub fn range(c: &mut Cursor, lo: u8, hi: u8) -> bool {
    match c.peek() {
        Some(b) if b >= lo && b <= hi => {
            c.advance();
            true
        }
        _ => false,
    }
}

/// Match and consume an exact byte sequence.
pub fn literal(c: &mut Cursor, bytes: &[u8]) -> bool {
    let start = c.mark();
    if c.remaining().starts_with(bytes) {
        c.skip(bytes.len());
        true
    } else {
        log::trace!("backtrack: literal mismatch at byte {start}");
        c.reset(start);
        false
    }
}

/// Always succeeds; runs `p` once for its side effect (e.g. a capture into a
/// binder) but does not require it to match.
pub fn opt<F: FnMut(&mut Cursor) -> bool>(c: &mut Cursor, mut p: F) -> bool {
    let start = c.mark();
    if !p(c) {
        c.reset(start);
    }
    true
}

/// Repeat `p` between `lo` and `hi` times inclusive (`hi = usize::MAX` for
/// unbounded). Fails and rewinds to the pre-repetition position if fewer
/// than `lo` repetitions matched.
pub fn times<F: FnMut(&mut Cursor) -> bool>(c: &mut Cursor, mut p: F, lo: usize, hi: usize) -> bool {
    let start = c.mark();
    let mut count = 0;
    while count < hi {
        let mark = c.mark();
        if !p(c) {
            c.reset(mark);
            break;
        }
        count += 1;
    }
    if count < lo {
        log::trace!("backtrack: times matched {count} of {lo} required at byte {start}");
        c.reset(start);
        false
    } else {
        true
    }
}

/// Run `p` purely to delimit a byte range: on success, returns the slice of
/// input `p` consumed without copying it. Handing this slice to a
/// [`crate::binder::Binder`] is the bridge between parsing and the document
/// builder (spec §4.1 "Capture → binder").
pub fn capture<'a, F: FnMut(&mut Cursor<'a>) -> bool>(
    c: &mut Cursor<'a>,
    mut p: F,
) -> Option<&'a [u8]> {
    let start = c.pos();
    if p(c) {
        Some(&c.input()[start..c.pos()])
    } else {
        None
    }
}

/// Test whether `p` would match without advancing the cursor either way.
pub fn lookahead<F: FnMut(&mut Cursor) -> bool>(c: &mut Cursor, mut p: F) -> bool {
    let start = c.mark();
    let ok = p(c);
    c.reset(start);
    ok
}

/// Negated lookahead: succeeds iff `p` would fail, never advances.
pub fn not<F: FnMut(&mut Cursor) -> bool>(c: &mut Cursor, mut p: F) -> bool {
    let start = c.mark();
    let ok = p(c);
    c.reset(start);
    !ok
}

/// Run a fixed conjunction of sub-parsers; if any fails, rewind to the
/// position before the first one ran. `$c` must be a simple mutable-cursor
/// lvalue (it is referenced once per branch).
#[macro_export]
macro_rules! seq {
    ($c:expr, $($p:expr),+ $(,)?) => {{
        let __start = $c.mark();
        let __ok = (|| -> bool {
            $( if !($p)(&mut *$c) { return false; } )+
            true
        })();
        if !__ok {
            log::trace!("backtrack: seq! failed at byte {__start}");
            $c.reset(__start);
        }
        __ok
    }};
}

/// Try each sub-parser in order, taking the first that matches; every
/// alternative rewinds before the next is tried.
#[macro_export]
macro_rules! alt {
    ($c:expr, $($p:expr),+ $(,)?) => {{
        let __start = $c.mark();
        let mut __ok = false;
        $(
            if !__ok {
                if ($p)(&mut *$c) {
                    __ok = true;
                } else {
                    log::trace!("backtrack: alt! alternative failed at byte {__start}");
                    $c.reset(__start);
                }
            }
        )+
        __ok
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_rewinds_on_partial_match() {
        let mut c = Cursor::new(b"abd");
        assert!(!literal(&mut c, b"abc"));
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn times_enforces_lower_bound() {
        let mut c = Cursor::new(b"aa");
        assert!(!times(&mut c, |c: &mut Cursor| ch(c, b'a'), 3, usize::MAX));
        assert_eq!(c.pos(), 0, "failed repetition rewinds fully");
    }

    #[test]
    fn times_stops_at_upper_bound() {
        let mut c = Cursor::new(b"aaaa");
        assert!(times(&mut c, |c: &mut Cursor| ch(c, b'a'), 1, 2));
        assert_eq!(c.pos(), 2);
    }

    #[test]
    fn capture_exposes_consumed_slice() {
        let mut c = Cursor::new(b"123abc");
        let digits = capture(&mut c, |c: &mut Cursor| times(c, |c: &mut Cursor| range(c, b'0', b'9'), 1, usize::MAX));
        assert_eq!(digits, Some(&b"123"[..]));
        assert_eq!(c.pos(), 3);
    }

    #[test]
    fn seq_rewinds_whole_group_on_late_failure() {
        let mut c = Cursor::new(b"ab!");
        let ok = seq!(&mut c, |c: &mut Cursor| ch(c, b'a'), |c: &mut Cursor| ch(c, b'b'), |c: &mut Cursor| ch(c, b'c'));
        assert!(!ok);
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn alt_rewinds_between_alternatives() {
        let mut c = Cursor::new(b"cat");
        let ok = alt!(&mut c, |c: &mut Cursor| literal(c, b"dog"), |c: &mut Cursor| literal(c, b"cat"));
        assert!(ok);
        assert_eq!(c.pos(), 3);
    }

    #[test]
    fn lookahead_never_advances() {
        let mut c = Cursor::new(b"abc");
        assert!(lookahead(&mut c, |c: &mut Cursor| ch(c, b'a')));
        assert_eq!(c.pos(), 0);
        assert!(!lookahead(&mut c, |c: &mut Cursor| ch(c, b'x')));
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn not_negates_without_advancing() {
        let mut c = Cursor::new(b"abc");
        assert!(!not(&mut c, |c: &mut Cursor| ch(c, b'a')));
        assert!(not(&mut c, |c: &mut Cursor| ch(c, b'z')));
        assert_eq!(c.pos(), 0);
    }

    #[test]
    fn success_does_not_require_consuming_all_input() {
        let mut c = Cursor::new(b"ab-trailing-garbage");
        assert!(seq!(&mut c, |c: &mut Cursor| ch(c, b'a'), |c: &mut Cursor| ch(c, b'b')));
        assert!(!c.is_at_end());
    }
}
