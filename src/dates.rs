//! Calendar-date derivation from stored record timestamps.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Derive the calendar day a record belongs to, in the user's local zone.
///
/// Full timestamps (RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS`) are mapped
/// to the local day. A bare `YYYY-MM-DD` carries no time-of-day information
/// and is taken as-is. Anything else yields `None`; callers decide whether
/// that skips the record or fails a match, but it never panics.
pub fn local_day(timestamp: &str) -> Option<NaiveDate> {
    let ts = timestamp.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}
