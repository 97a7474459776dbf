use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{DomainError, Result};

/// Format of `from` / `to` query bounds, e.g. `20250518143000`
const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses the caller-supplied weighing time.
///
/// Accepts RFC 3339 with an offset, or a naive ISO-8601 date-time read as UTC.
pub fn parse_weighing_time(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::Validation(format!("datetime '{value}' is not ISO-8601")))
}

/// Parses a `YYYYMMDDHHMMSS` bound, read as UTC
pub fn parse_compact(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), COMPACT_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
