//! Calendar-date arithmetic.
//!
//! Everything here works on `NaiveDate` -- plain calendar dates with no
//! time-of-day or timezone attached -- so day counts cannot be perturbed
//! by DST shifts or midnight boundaries.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

/// All dates of `year` from Jan 1 through Dec 31, ascending.
///
/// Leap-year aware. Pure function: returns a fresh vector on every call.
/// An out-of-range year yields an empty vector.
pub fn days_in_year(year: i32) -> Vec<NaiveDate> {
    let (first, last) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };
    first.iter_days().take_while(|d| *d <= last).collect()
}

/// Format a date as zero-padded `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a strict `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Signed whole-day count from `from` to `to`.
///
/// Exactly +1 for adjacent calendar days regardless of month or year
/// boundaries; negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Weekday bucket index: 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_year_has_366_days() {
        let days = days_in_year(2024);
        assert_eq!(days.len(), 366);
        assert_eq!(days[0], date(2024, 1, 1));
        assert_eq!(days[366 - 1], date(2024, 12, 31));
        assert!(days.contains(&date(2024, 2, 29)));
    }

    #[test]
    fn common_year_has_365_days() {
        let days = days_in_year(2026);
        assert_eq!(days.len(), 365);
        assert_eq!(days[58], date(2026, 2, 28));
        assert_eq!(days[59], date(2026, 3, 1));
    }

    #[test]
    fn days_are_strictly_ascending() {
        let days = days_in_year(2026);
        for pair in days.windows(2) {
            assert_eq!(days_between(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn format_is_zero_padded() {
        assert_eq!(format_date(date(2026, 1, 5)), "2026-01-05");
        assert_eq!(format_date(date(2026, 11, 30)), "2026-11-30");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn adjacent_days_across_boundaries() {
        assert_eq!(days_between(date(2026, 1, 31), date(2026, 2, 1)), 1);
        assert_eq!(days_between(date(2025, 12, 31), date(2026, 1, 1)), 1);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 2, 29)), 1);
        assert_eq!(days_between(date(2026, 1, 2), date(2026, 1, 1)), -1);
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        // 2026-01-04 is a Sunday, 2026-01-05 a Monday.
        assert_eq!(weekday_index(date(2026, 1, 4)), 0);
        assert_eq!(weekday_index(date(2026, 1, 5)), 1);
        assert_eq!(weekday_index(date(2026, 1, 10)), 6);
    }

    #[test]
    fn round_trip_every_day_of_leap_and_common_year() {
        for year in [2024, 2026] {
            for day in days_in_year(year) {
                assert_eq!(parse_date(&format_date(day)).unwrap(), day);
            }
        }
    }

    proptest! {
        #[test]
        fn round_trip_arbitrary_dates(y in 1i32..=9999, ordinal in 0u32..365) {
            let days = days_in_year(y);
            let day = days[ordinal as usize % days.len()];
            prop_assert_eq!(parse_date(&format_date(day)).unwrap(), day);
        }
    }
}
