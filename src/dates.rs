//! Conversions between the backend's ISO-8601 date strings and the
//! `YYYY-MM-DD` values held by date form controls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serializer;

use crate::error::AppError;

pub const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Parses a backend date, accepting full RFC 3339 timestamps or bare calendar dates.
pub fn parse(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, INPUT_FORMAT) {
        return Some(date);
    }
    // `2024-05-01T00:00:00` without an offset
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, INPUT_FORMAT).ok())
}

/// Parses a backend timestamp for ordering. Bare dates count as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| parse(raw).and_then(|date| date.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc()))
}

/// Value for a date control. Absent or unreadable dates give an empty control.
pub fn to_input_value(raw: Option<&str>) -> String {
    raw.and_then(parse)
        .map(|date| date.format(INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// Validates what a user typed into a date control. Empty means "unset".
pub fn parse_input(value: &str) -> Result<Option<NaiveDate>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, INPUT_FORMAT)
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Table cell for an optional date.
pub fn display(raw: Option<&str>) -> String {
    raw.and_then(parse)
        .map(|date| date.format(INPUT_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Writes an empty control as `null`.
pub fn serialize_input<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = value.trim();
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(value)
    }
}
