//! Date parsing and formatting helpers shared by the derivation layer
//!
//! The backend sends dates as strings. Plain calendar dates (`2024-03-15`)
//! and full timestamps (`2024-03-15T10:30:00Z`, `2024-03-15T10:30:00`) both
//! occur in the wild; only the calendar date is meaningful here.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::errors::{Result, SalesDeskError};

/// Parse a backend date string into a calendar date.
///
/// # Errors
/// Returns `SalesDeskError::Validation` when the value is blank or matches
/// none of the accepted formats.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(SalesDeskError::Validation("date is empty".into()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp.date());
        }
    }

    Err(SalesDeskError::Validation(format!("unparseable date: {value:?}")))
}

/// Same month and day, `years` later.
///
/// 29 February rolls over to 1 March when the target year is not a leap year.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28)?.succ_opt())
}

/// Parse a `YYYY-MM` month key into the first day of that month.
pub fn parse_month_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", key.trim()), "%Y-%m-%d").ok()
}

/// Human label for a month key, e.g. `2025-01` → `Jan 2025`.
///
/// Keys that are not `YYYY-MM` are returned unchanged.
pub fn month_label(key: &str) -> String {
    parse_month_key(key).map_or_else(|| key.to_string(), |date| date.format("%b %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        assert_eq!(parse_calendar_date("2024-03-15").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date("2024-03-15T10:30:00Z").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date("2024-03-15T10:30:00.123").unwrap(), ymd(2024, 3, 15));
        assert_eq!(parse_calendar_date(" 2024-03-15 08:00:00 ").unwrap(), ymd(2024, 3, 15));
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(matches!(parse_calendar_date("  "), Err(SalesDeskError::Validation(_))));
        assert!(matches!(parse_calendar_date("15/03/2024"), Err(SalesDeskError::Validation(_))));
        assert!(matches!(parse_calendar_date("2024-02-30"), Err(SalesDeskError::Validation(_))));
    }

    #[test]
    fn add_years_keeps_month_and_day() {
        assert_eq!(add_years(ymd(2023, 6, 30), 1), Some(ymd(2024, 6, 30)));
    }

    #[test]
    fn leap_day_rolls_to_march_first() {
        assert_eq!(add_years(ymd(2024, 2, 29), 1), Some(ymd(2025, 3, 1)));
        assert_eq!(add_years(ymd(2024, 2, 29), 4), Some(ymd(2028, 2, 29)));
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_label("2025-01"), "Jan 2025");
        assert_eq!(month_label("2024-12"), "Dec 2024");
        assert_eq!(month_label("Q1"), "Q1");
        assert_eq!(parse_month_key("2025-13"), None);
    }
}
