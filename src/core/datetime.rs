//! Calendar arithmetic and timestamp parsing.
//!
//! All helpers work on date-only values; any time of day is dropped before
//! arithmetic happens. Month arithmetic clamps to the last valid day of the
//! target month (Jan 31 + 1 month = Feb 28/29).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Add (or subtract) whole calendar days.
///
/// Returns `date` unchanged if the offset or the result is outside chrono's range.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(date)
}

/// Number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

/// Last calendar day of the month `date` falls in.
#[must_use]
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

/// December 31 of the given year.
#[must_use]
pub fn last_day_of_year(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
}

/// Add calendar months, clamping the day to the target month's length.
#[must_use]
pub fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Add calendar years; Feb 29 becomes Feb 28 when the target year is not a leap year.
#[must_use]
pub fn add_years_clamped(date: NaiveDate, years: i32) -> NaiveDate {
    add_months_clamped(date, years * 12)
}

/// Weekday index with Sunday = 0 and Saturday = 6.
#[must_use]
pub fn sunday_index(weekday: Weekday) -> i64 {
    i64::from(weekday.num_days_from_sunday())
}

/// Days from `date` forward to the next `target` weekday, in `0..7`.
///
/// Returns 0 when `date` already falls on `target`.
#[must_use]
pub fn days_until_weekday(date: NaiveDate, target: Weekday) -> i64 {
    (sunday_index(target) + 7 - sunday_index(date.weekday())) % 7
}

/// Parse a stored or user-supplied timestamp.
///
/// Accepts `2024-01-05`, `2024-01-05T10:30:00`, `2024-01-05 10:30:00`, and
/// RFC 3339 (`2024-01-05T10:30:00Z`, converted to local wall-clock time).
/// Bare dates are read as midnight.
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Local).naive_local())
}

/// Parse a timestamp and keep only its date.
#[must_use]
pub fn parse_date_only(input: &str) -> Option<NaiveDate> {
    parse_timestamp(input).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_days_out_of_range_keeps_date() {
        let base = date(2024, 1, 3);
        assert_eq!(add_days(base, 2), date(2024, 1, 5));
        assert_eq!(add_days(base, -3), date(2023, 12, 31));
        assert_eq!(add_days(base, i64::MAX), base);
        assert_eq!(add_days(base, i64::MIN), base);
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2023, 11, 30)), date(2023, 11, 30));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months_clamped(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months_clamped(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months_clamped(date(2024, 3, 31), 1), date(2024, 4, 30));
        assert_eq!(add_months_clamped(date(2024, 1, 15), 1), date(2024, 2, 15));
    }

    #[test]
    fn test_add_months_crosses_years() {
        assert_eq!(add_months_clamped(date(2024, 11, 30), 3), date(2025, 2, 28));
        assert_eq!(add_months_clamped(date(2024, 12, 5), 1), date(2025, 1, 5));
        assert_eq!(add_months_clamped(date(2024, 1, 5), -1), date(2023, 12, 5));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(add_years_clamped(date(2024, 2, 29), 1), date(2025, 2, 28));
        assert_eq!(add_years_clamped(date(2024, 2, 29), 4), date(2028, 2, 29));
        assert_eq!(add_years_clamped(date(2023, 6, 1), 1), date(2024, 6, 1));
    }

    #[test]
    fn test_days_until_weekday() {
        // 2024-01-03 is a Wednesday
        let wed = date(2024, 1, 3);
        assert_eq!(days_until_weekday(wed, Weekday::Wed), 0);
        assert_eq!(days_until_weekday(wed, Weekday::Fri), 2);
        assert_eq!(days_until_weekday(wed, Weekday::Mon), 5);
        assert_eq!(days_until_weekday(wed, Weekday::Sun), 4);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = date(2024, 1, 5).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-05"), Some(midnight));
        assert_eq!(
            parse_timestamp("2024-01-05T10:30:00"),
            date(2024, 1, 5).and_hms_opt(10, 30, 0)
        );
        assert_eq!(
            parse_timestamp("2024-01-05 10:30:00"),
            date(2024, 1, 5).and_hms_opt(10, 30, 0)
        );
        assert!(parse_timestamp("2024-01-05T10:30:00Z").is_some());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2024-02-30"), None);
    }

    #[test]
    fn test_parse_date_only_drops_time() {
        assert_eq!(parse_date_only("2024-01-20T18:45:00"), Some(date(2024, 1, 20)));
    }
}
