//! Timestamp and bounded formatting helpers
//!
//! Timestamps use local time in the fixed form `[YYYY-MM-DD HH:MM:SS]`.
//! Bounded formatting never overflows: text that would exceed the bound is
//! cut at the nearest UTF-8 character boundary.

use chrono::{DateTime, Local, NaiveDateTime};
use std::borrow::Cow;

/// strftime pattern for every timestamp the tool writes.
pub const TIMESTAMP_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";

/// Length in bytes of a formatted timestamp.
pub const TIMESTAMP_LEN: usize = 21;

/// Current local time formatted as `[YYYY-MM-DD HH:MM:SS]`.
pub fn timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Format a specific instant.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a bracketed timestamp produced by [`timestamp`].
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

/// Truncate `value` to at most `max` bytes without splitting a character.
pub fn bounded(value: &str, max: usize) -> Cow<'_, str> {
    if value.len() <= max {
        return Cow::Borrowed(value);
    }
    let mut end = max;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(value[..end].to_string())
}

/// Escape line breaks so a single message can never span two log lines.
pub fn single_line(input: &str) -> Cow<'_, str> {
    if !input.contains(['\n', '\r']) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace('\n', "\\n").replace('\r', "\\r"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), TIMESTAMP_LEN);
        assert!(ts.starts_with('[') && ts.ends_with(']'));
        assert!(parse_timestamp(&ts).is_some());
    }

    #[test]
    fn test_format_fixed_instant() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_timestamp(&at), "[2024-03-07 09:05:01]");
    }

    #[test]
    fn test_bounded_truncates() {
        assert_eq!(bounded("hello", 10), "hello");
        assert_eq!(bounded("hello", 3), "hel");
        assert_eq!(bounded("", 0), "");
    }

    #[test]
    fn test_bounded_respects_char_boundary() {
        // 'é' is two bytes; cutting at 2 would split it
        let s = "aé";
        assert_eq!(bounded(s, 2), "a");
        assert_eq!(bounded(s, 3), "aé");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("plain"), "plain");
        assert_eq!(single_line("a\nb\r"), "a\\nb\\r");
    }
}
