//! Exercises the `debug!`/`trace!` call sites on the parse-failure path under
//! a real `log` backend, so they run through an actual subscriber rather than
//! going straight to the no-op default.

use streamcore::json;
use streamcore::syslog::{parse_rfc5424, Mode, Rfc5424Binding, Rfc5424Config};

#[test]
fn malformed_json_logs_through_env_logger_without_panicking() {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = json::parse(b"{not json").unwrap_err();
    assert_eq!(err.offset, 1);
}

#[test]
fn malformed_syslog_frame_logs_through_env_logger_without_panicking() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Rfc5424Config { mode: Mode::Strict, binding: Rfc5424Binding::default() };
    assert!(parse_rfc5424(b"not a syslog frame at all", &config).is_err());
}
