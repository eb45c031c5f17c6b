//! Human-friendly due date labels.

use chrono::{Datelike, NaiveDate};

use crate::core::parse_date_only;

/// Render `date` relative to `today`.
///
/// Returns `"Today"` or `"Tomorrow"` when they apply, otherwise a short form
/// such as `"Fri, Jan 5"`. The year is appended only when it differs from
/// the current one: `"Sun, Jan 5, 2025"`.
#[must_use]
pub fn format_date_for_display(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_string();
    }

    if date.year() == today.year() {
        date.format("%a, %b %-d").to_string()
    } else {
        date.format("%a, %b %-d, %Y").to_string()
    }
}

/// Like [`format_date_for_display`] for a date stored as text.
///
/// Unparseable input yields an empty string.
#[must_use]
pub fn format_date_str(input: &str, today: NaiveDate) -> String {
    parse_date_only(input).map_or_else(String::new, |date| format_date_for_display(date, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_and_tomorrow() {
        let today = date(2024, 1, 3);
        assert_eq!(format_date_for_display(today, today), "Today");
        assert_eq!(format_date_for_display(date(2024, 1, 4), today), "Tomorrow");
    }

    #[test]
    fn test_tomorrow_across_year_boundary() {
        assert_eq!(format_date_for_display(date(2025, 1, 1), date(2024, 12, 31)), "Tomorrow");
    }

    #[test]
    fn test_same_year_omits_year() {
        let today = date(2024, 1, 3);
        assert_eq!(format_date_for_display(date(2024, 1, 5), today), "Fri, Jan 5");
        assert_eq!(format_date_for_display(date(2024, 1, 2), today), "Tue, Jan 2");
    }

    #[test]
    fn test_other_year_includes_year() {
        let today = date(2024, 12, 30);
        assert_eq!(format_date_for_display(date(2025, 1, 5), today), "Sun, Jan 5, 2025");
        assert_eq!(format_date_for_display(date(2023, 12, 25), today), "Mon, Dec 25, 2023");
    }

    #[test]
    fn test_format_date_str() {
        let today = date(2024, 1, 3);
        assert_eq!(format_date_str("2024-01-03", today), "Today");
        assert_eq!(format_date_str("2024-01-04T09:00:00", today), "Tomorrow");
        assert_eq!(format_date_str("not a date", today), "");
        assert_eq!(format_date_str("", today), "");
    }
}
