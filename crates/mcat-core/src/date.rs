//! # Date-Like Text
//!
//! `release_date` and `last_update` are free text in the catalog schema.
//! Submissions in practice use a handful of shapes; [`parse_date_like`]
//! interprets them for callers that want a calendar date, and for the
//! opt-in strict date check.
//!
//! Accepted shapes:
//!
//! | Shape | Example | Interpreted as |
//! |-------|---------|----------------|
//! | `YYYY-MM-DD` | `2023-04-17` | that day |
//! | `YYYY-MM` | `2023-04` | first day of the month |
//! | `YYYY` | `2023` | January 1st |
//! | RFC 3339 | `2023-04-17T12:00:00Z` | the UTC calendar day |

use chrono::{DateTime, NaiveDate, Utc};

/// Interpret date-like text as a calendar date.
///
/// Returns `None` when the text matches none of the accepted shapes.
pub fn parse_date_like(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Some((year, month)) = text.split_once('-') {
        if year.len() == 4 && month.len() == 2 {
            let year: i32 = year.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, 1);
        }
        return None;
    }
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_date() {
        assert_eq!(parse_date_like("2023-04-17"), Some(ymd(2023, 4, 17)));
    }

    #[test]
    fn year_month() {
        assert_eq!(parse_date_like("2021-11"), Some(ymd(2021, 11, 1)));
    }

    #[test]
    fn year_only() {
        assert_eq!(parse_date_like("2019"), Some(ymd(2019, 1, 1)));
    }

    #[test]
    fn rfc3339_is_converted_to_utc_day() {
        assert_eq!(
            parse_date_like("2023-04-17T23:30:00-05:00"),
            Some(ymd(2023, 4, 18))
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_date_like(" 2020-01-02 "), Some(ymd(2020, 1, 2)));
    }

    #[test]
    fn rejects_unrecognized_text() {
        assert_eq!(parse_date_like("last spring"), None);
        assert_eq!(parse_date_like("2023-13"), None);
        assert_eq!(parse_date_like("2023-02-30"), None);
        assert_eq!(parse_date_like("04/17/2023"), None);
        assert_eq!(parse_date_like("20231"), None);
        assert_eq!(parse_date_like(""), None);
    }
}
