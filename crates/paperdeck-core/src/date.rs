//! Publication date parsing and formatting.
//!
//! Datasets written by different fetchers disagree on date format, so parsing
//! tries a short list of layouts. Anything that fails all of them yields
//! `None`, which sorts as the earliest possible instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Shown in place of a date that could not be parsed.
pub const UNKNOWN_DATE: &str = "n.d.";

/// Layouts without a zone, taken as UTC. `%.f` also matches no fraction.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// ISO 8601 layouts RFC 3339 rejects: basic offsets (`+0000`) and minute
/// precision. `%#z` accepts `Z`, `+00`, `+0000` and `+00:00`.
const ZONED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
];

/// Parse a publication timestamp, normalized to UTC.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ZONED_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format as `YYYY-MM-DD` (UTC calendar date).
pub fn format_date(published_at: Option<DateTime<Utc>>) -> String {
    match published_at {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}
