//! Timestamp utilities: parsing stored timestamps and rendering them in UTC.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive layouts accepted from stores that drop the offset. Read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a stored timestamp into UTC.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Postgres may render "+00" without minutes
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(AppError::InvalidTimestamp(s.to_string()))
}

/// `YYYY-MM-DD HH:MM:SS`, UTC, no offset.
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

/// Parse then render; unparsable input is returned untouched.
pub fn format_stored(s: &str) -> String {
    parse_timestamp(s)
        .map(|dt| format_utc(&dt))
        .unwrap_or_else(|_| s.to_string())
}

/// Serialize for storage (RFC 3339, `Z` suffix, second precision).
pub fn to_storage(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}
