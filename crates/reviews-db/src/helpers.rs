//! Row-to-entity parsing helpers.
//!
//! Converts column-indexed `libsql::Row` values into typed fields. Handles the
//! dual datetime format (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`)
//! and integer-encoded booleans.

use chrono::{DateTime, Utc};
use reviews_core::ContentType;

use crate::error::DatabaseError;

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

/// Parse a TEXT column holding an `app_label.model` identifier.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value is malformed.
pub fn parse_content_type(s: &str) -> Result<ContentType, DatabaseError> {
    s.parse()
        .map_err(|e| DatabaseError::Query(format!("Bad content type in column: {e}")))
}

/// Read an INTEGER column used as a boolean (0 = false, anything else = true).
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Double-quote a SQL identifier, doubling any embedded quotes.
#[must_use]
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
