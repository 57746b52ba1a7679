//! Calendar range enumeration.
//!
//! Expands an inclusive `start..=end` date range into one [`CalendarDay`]
//! per date, tagged with both weekday conventions and whether the day is
//! pre-checked as a rest day (Saturday and Sunday).

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::CalendarError;
use crate::weekday;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// One day of an enumerated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Weekday in the client convention (0 = Sunday).
    pub client_weekday_index: u8,
    /// Weekday in the remote convention (0 = Monday).
    pub remote_weekday_index: u8,
    /// Saturday and Sunday start out checked as rest days.
    pub is_default_rest_day: bool,
}

impl CalendarDay {
    /// Build the entry for a single date.
    pub fn new(date: NaiveDate) -> Self {
        let client = weekday::client_index_of(date);
        Self {
            date,
            client_weekday_index: client,
            remote_weekday_index: weekday::remote_index(date.weekday()),
            is_default_rest_day: client == 0 || client == 6,
        }
    }

    /// The date as `YYYY-MM-DD`.
    pub fn iso_date(&self) -> String {
        self.date.format(ISO_FORMAT).to_string()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Full English weekday name.
    pub fn weekday_name(&self) -> &'static str {
        match self.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

/// Iterator over every date from `start` to `end`, inclusive and ascending.
///
/// A range is consumed once; build a new one to enumerate again.
#[derive(Debug, Clone)]
pub struct CalendarRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl CalendarRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self {
            next: Some(start),
            end,
        })
    }

    fn remaining(&self) -> usize {
        match self.next {
            Some(d) if d <= self.end => ((self.end - d).num_days() + 1) as usize,
            _ => 0,
        }
    }
}

impl Iterator for CalendarRange {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<CalendarDay> {
        let current = self.next.filter(|d| *d <= self.end)?;
        // `succ_opt` is None only at NaiveDate::MAX, which ends the range anyway.
        self.next = current.succ_opt();
        Some(CalendarDay::new(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for CalendarRange {}

/// Enumerate `start..=end` into a vector of days.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> Result<Vec<CalendarDay>, CalendarError> {
    let days: Vec<CalendarDay> = CalendarRange::new(start, end)?.collect();
    tracing::debug!(%start, %end, days = days.len(), "enumerated calendar range");
    Ok(days)
}

/// Client-convention weekday indices pre-checked as rest days within a range,
/// in order of first appearance and without duplicates.
pub fn default_rest_days(days: &[CalendarDay]) -> Vec<u8> {
    let mut out = Vec::new();
    for day in days.iter().filter(|d| d.is_default_rest_day) {
        if !out.contains(&day.client_weekday_index) {
            out.push(day.client_weekday_index);
        }
    }
    out
}
