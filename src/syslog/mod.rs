//! RFC 5424 / RFC 3164 syslog wire codec, built on [`crate::parser`] and
//! [`crate::binder`] (spec §4.4).

mod common;
mod rfc3164;
mod rfc5424;

pub use common::{Mode, Rfc3164Binding, Rfc5424Binding, Rfc5424Config};
pub use rfc3164::{parse_rfc3164, print_rfc3164};
pub use rfc5424::{parse_rfc5424, print_rfc5424};
