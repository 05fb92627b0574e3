//! Row-to-entity parsing helpers and SQL value conversions.
//!
//! Timestamps are stored as RFC 3339 TEXT, calendar dates as `YYYY-MM-DD`
//! TEXT, enums as their `as_str()` form.

use chrono::{DateTime, NaiveDate, Utc};
use libsql::Value;

use crate::error::DatabaseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not `YYYY-MM-DD`.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with every hlm-core enum, including the spaced approval states.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    Ok(row.get::<Option<i64>>(idx)?)
}

/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

// --- Value encoding ---

#[must_use]
pub fn text(s: impl Into<String>) -> Value {
    Value::Text(s.into())
}

#[must_use]
pub fn opt_text<S: AsRef<str>>(s: Option<S>) -> Value {
    s.map_or(Value::Null, |s| Value::Text(s.as_ref().to_string()))
}

#[must_use]
pub fn opt_int(n: Option<i64>) -> Value {
    n.map_or(Value::Null, Value::Integer)
}

#[must_use]
pub fn date_text(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn opt_date(d: Option<NaiveDate>) -> Value {
    d.map_or(Value::Null, |d| Value::Text(date_text(d)))
}

#[must_use]
pub fn timestamp(dt: DateTime<Utc>) -> Value {
    Value::Text(dt.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlm_core::enums::ApprovalStatus;

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2024-01-01T09:00:00+00:00").unwrap();
        let b = parse_datetime("2024-01-01 09:00:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn date_roundtrip_text() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_text(d), "2024-01-01");
        assert_eq!(parse_date("2024-01-01").unwrap(), d);
        assert!(parse_date("01/01/2024").is_err());
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
    }

    #[test]
    fn parse_enum_handles_spaced_states() {
        let s: ApprovalStatus = parse_enum("client review").unwrap();
        assert_eq!(s, ApprovalStatus::ClientReview);
        assert!(parse_enum::<ApprovalStatus>("approved").is_err());
    }

    #[test]
    fn optional_values_become_null() {
        assert!(matches!(opt_text(None::<&str>), Value::Null));
        assert!(matches!(opt_int(Some(3)), Value::Integer(3)));
        assert!(matches!(opt_date(None), Value::Null));
    }
}
