//! HTTP-date handling (RFC 1123 form, always GMT).

use chrono::{DateTime, NaiveDateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a point in time as an HTTP-date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_http_date(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format(HTTP_DATE_FORMAT).to_string()
}

/// Parses an RFC 1123 HTTP-date. Returns `None` for anything else.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Truncates a modification time to whole seconds, the resolution of an HTTP-date.
pub fn to_http_resolution(time: SystemTime) -> DateTime<Utc> {
    let datetime: DateTime<Utc> = time.into();
    DateTime::from_timestamp(datetime.timestamp(), 0).unwrap_or(datetime)
}
