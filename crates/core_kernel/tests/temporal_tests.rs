//! Integration tests for calendar math

use chrono::NaiveDate;
use core_kernel::{add_months, advance_window, DateRange};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn window_spans_whole_months_inclusive() {
    // Three months of rent collected on Jan 1 cover Jan 1 through Mar 31.
    let window = advance_window(d(2025, 1, 1), 3).unwrap();

    assert!(window.contains(d(2025, 1, 1)));
    assert!(window.contains(d(2025, 3, 31)));
    assert!(!window.contains(d(2024, 12, 31)));
    assert!(!window.contains(d(2025, 4, 1)));
}

#[test]
fn window_clamps_across_february() {
    let window = advance_window(d(2025, 1, 30), 1).unwrap();

    // Jan 30 + 1 month clamps to Feb 28, window ends the day before: Feb 27.
    assert_eq!(window.end, d(2025, 2, 27));
}

#[test]
fn leap_year_month_addition() {
    assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
    assert_eq!(add_months(d(2023, 11, 30), 3).unwrap(), d(2024, 2, 29));
}

#[test]
fn twelve_month_window() {
    let window = advance_window(d(2025, 6, 1), 12).unwrap();
    assert_eq!(window.end, d(2026, 5, 31));
}

#[test]
fn date_range_day_count_is_inclusive() {
    let january = DateRange::new(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
    assert_eq!(january.days(), 31);
}
