//! Calendar math for rent periods
//!
//! This module provides the date types used by invoicing and the advance-rent
//! coverage window: inclusive date ranges and month arithmetic with
//! end-of-month clamping (Jan 31 + 1 month = Feb 28/29).

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Date arithmetic out of range")]
    OutOfRange,
}

/// An inclusive range of civil dates
///
/// Used for lease terms and for the advance-rent coverage window. Both
/// endpoints are part of the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Adds calendar months to a date, clamping to the last day of the month
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    date.checked_add_months(Months::new(months))
        .ok_or(TemporalError::OutOfRange)
}

/// Computes the coverage window for prepaid rent
///
/// The window starts on the given date and spans `months` whole calendar
/// months: the end is `start + months − 1 day`. Returns `None` when no
/// months were purchased, in which case no window exists.
pub fn advance_window(start: NaiveDate, months: u32) -> Option<DateRange> {
    if months == 0 {
        return None;
    }

    let end = start
        .checked_add_months(Months::new(months))?
        .checked_sub_days(Days::new(1))?;

    Some(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let result = DateRange::new(d(2025, 2, 1), d(2025, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_date_range_inclusive() {
        let range = DateRange::new(d(2025, 1, 1), d(2025, 3, 31)).unwrap();

        assert!(range.contains(d(2025, 1, 1)));
        assert!(range.contains(d(2025, 3, 31)));
        assert!(!range.contains(d(2025, 4, 1)));
        assert_eq!(range.days(), 90);
    }

    #[test]
    fn test_add_months_clamps_end_of_month() {
        assert_eq!(add_months(d(2025, 1, 31), 1).unwrap(), d(2025, 2, 28));
        assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_advance_window_three_months() {
        let window = advance_window(d(2025, 1, 1), 3).unwrap();

        assert_eq!(window.start, d(2025, 1, 1));
        assert_eq!(window.end, d(2025, 3, 31));
    }

    #[test]
    fn test_advance_window_mid_month_start() {
        let window = advance_window(d(2025, 1, 15), 2).unwrap();

        assert_eq!(window.end, d(2025, 3, 14));
    }

    #[test]
    fn test_advance_window_zero_months() {
        assert!(advance_window(d(2025, 1, 1), 0).is_none());
    }
}
