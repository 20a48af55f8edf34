//! Time utility functions

use chrono::{NaiveDate, NaiveDateTime};

/// Date-time format used by grid date filters (`yyyy-MM-dd HH:mm:ss`)
pub const GRID_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a grid filter date-time string
pub fn parse_grid_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, GRID_DATETIME_FORMAT)
}

/// Parse a date-time cell value from stored rows.
///
/// Accepts the grid format, ISO 8601 with a `T` separator (with or without a
/// UTC offset) and plain dates (midnight).
pub fn parse_cell_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = parse_grid_datetime(s) {
        return Some(dt);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a date-time in the grid format
pub fn format_grid_datetime(dt: &NaiveDateTime) -> String {
    dt.format(GRID_DATETIME_FORMAT).to_string()
}
