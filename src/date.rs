//! Post date parsing and localized display.
//!
//! Dates are kept as the raw frontmatter string on [`Post`](crate::post::Post).
//! They are only parsed to order posts and to print them as `2024年3月1日`.
//! An unparseable date is not an error: it sorts last and prints verbatim.

use chrono::{DateTime, Datelike, NaiveDate};

/// Parse `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Format a date as `{year}年{month}月{day}日`, without zero padding.
///
/// Returns the input unchanged when it does not parse.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        None => raw.to_string(),
    }
}
