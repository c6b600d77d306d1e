//! Timestamp utilities
//!
//! Show start times are stored as fixed-width UTC text (`YYYY-MM-DDTHH:MM:SSZ`),
//! so a bound "now" in the same encoding compares correctly with plain SQL
//! string comparison.

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use std::ops::RangeInclusive;

use crate::{Error, Result};

/// Storage and ISO-8601 display encoding
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Naive layouts accepted from forms, interpreted as UTC
const NAIVE_FORM_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Encode a timestamp in the canonical form (sub-second precision is dropped)
pub fn encode_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

/// Decode a timestamp previously written by [`encode_timestamp`]
pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::InvalidInput(format!("Malformed timestamp {:?}: {}", value, e)))
}

/// Years the canonical encoding can hold as fixed-width, RFC 3339 text
const STORABLE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Parse a user-supplied start time
///
/// Accepts RFC 3339 (any offset) and the naive layouts produced by text inputs
/// and `datetime-local` inputs. Returns `None` when nothing matches or when
/// the year falls outside 1..=9999 (chrono's `%Y` also takes signed and
/// five-digit years, which would not decode once stored).
pub fn parse_form_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let parsed = match DateTime::parse_from_rfc3339(input) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(_) => NAIVE_FORM_FORMATS
            .iter()
            .find_map(|layout| NaiveDateTime::parse_from_str(input, layout).ok())
            .map(|naive| naive.and_utc()),
    };

    parsed.filter(|dt| STORABLE_YEARS.contains(&dt.year()))
}

/// Human-readable layouts for show times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `Tuesday May 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
}

/// Format a timestamp for display
pub fn format_datetime(dt: &DateTime<Utc>, format: DisplayFormat) -> String {
    let layout = match format {
        DisplayFormat::Full => "%A %B %-d, %Y at %-I:%M%p",
        DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    dt.format(layout).to_string()
}
