// timejump - core/timestamp.rs
//
// Fixed-width timestamp prefix parsing.
//
// Every log-originating line starts with `YYYY-MM-DD HH:MM:SS.mmm`
// (23 characters). The layout is checked byte-by-byte before chrono
// validates the field values, so lenient chrono parsing (signed years,
// single-digit fields) never widens what counts as a timestamp.

use crate::util::constants::{TIMESTAMP_FORMAT, TIMESTAMP_PREFIX_LEN};
use chrono::NaiveDateTime;

/// Expected prefix layout: `D` is any ASCII digit, everything else literal.
const PREFIX_LAYOUT: &[u8; TIMESTAMP_PREFIX_LEN] = b"DDDD-DD-DD DD:DD:DD.DDD";

/// Parse the timestamp prefix of `line`.
///
/// Returns `None` for blank, short, or malformed lines and for prefixes with
/// impossible values (month 13, Feb 30, hour 24). Text after the prefix is
/// ignored.
pub fn parse_line_timestamp(line: &str) -> Option<NaiveDateTime> {
    let prefix = line.get(..TIMESTAMP_PREFIX_LEN)?;
    if !matches_layout(prefix.as_bytes()) {
        return None;
    }
    NaiveDateTime::parse_from_str(prefix, TIMESTAMP_FORMAT).ok()
}

fn matches_layout(bytes: &[u8]) -> bool {
    bytes.len() == PREFIX_LAYOUT.len()
        && bytes
            .iter()
            .zip(PREFIX_LAYOUT.iter())
            .all(|(&b, &expected)| match expected {
                b'D' => b.is_ascii_digit(),
                literal => b == literal,
            })
}

/// Signed distance from `previous` to `current` in seconds.
///
/// Negative when the log goes backwards in time.
pub fn seconds_between(previous: NaiveDateTime, current: NaiveDateTime) -> f64 {
    (current - previous).num_milliseconds() as f64 / 1000.0
}
