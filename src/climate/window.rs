use super::QueryError;
use chrono::{Duration, NaiveDate};

/// Length of the trailing observation window
pub const TRAILING_WINDOW_DAYS: i64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// First day of the trailing window ending at `most_recent`.
///
/// Flat 365-day calendar subtraction; leap days are not special-cased.
pub fn trailing_window_start(most_recent: &str) -> Result<String, QueryError> {
    let most_recent = NaiveDate::parse_from_str(most_recent, DATE_FORMAT)
        .map_err(|_| QueryError::InvalidStoredDate(most_recent.to_string()))?;

    let start = most_recent - Duration::days(TRAILING_WINDOW_DAYS);
    Ok(start.format(DATE_FORMAT).to_string())
}
