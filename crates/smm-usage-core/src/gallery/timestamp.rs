use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::storage::Timestamp;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// `YYYY-MM-DD HH:MM:SS` for anything that parses as a point in time; the original text
/// otherwise. Offsets are dropped, not converted: the wall-clock time is shown as written.
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::Native(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        Timestamp::Text(text) => match parse_iso8601(text) {
            Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
            None => text.clone(),
        },
        Timestamp::Other(text) => text.clone(),
    }
}

/// Parse an ISO-8601 date or date-time; a trailing `Z` is read as `+00:00`.
pub fn parse_iso8601(text: &str) -> Option<NaiveDateTime> {
    let normalized = match text.strip_suffix('Z') {
        Some(rest) => format!("{}+00:00", rest),
        None => text.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(dt.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
