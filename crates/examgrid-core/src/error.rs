//! Calendar error types.
//!
//! These errors come from building the scheduling request: enumerating the
//! selected date range and translating weekday indices between conventions.
//! The query engine itself never fails.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while enumerating dates or translating weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The range start falls after its end.
    #[error("invalid range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A weekday index outside `0..=6` was passed to a translation.
    #[error("invalid weekday index: {index} (must be 0..=6)")]
    InvalidWeekday { index: u8 },

    /// A date string that is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
