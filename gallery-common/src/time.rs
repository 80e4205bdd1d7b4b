//! Calendar date utilities
//!
//! CMS dates arrive as loosely formatted strings (`2024-05-01`,
//! `2024-05-01 10:00`, `2024-05-01T10:00:00.000Z`). Filters only ever compare
//! at date granularity, so everything here works on [`NaiveDate`].

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Date formats accepted for the leading date token
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Current local wall-clock time
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse the calendar date at the start of a CMS date string
///
/// Only the leading token (split on whitespace or `T`) is read; time of day
/// is ignored. Returns `None` for empty or unrecognised input.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let token = raw
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .filter(|t| !t.is_empty())?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// True when `date` lies strictly before the calendar day of `now`
pub fn is_before_today(date: NaiveDate, now: NaiveDateTime) -> bool {
    date < now.date()
}

/// Format a date for display (`1 Jan 2024`), keeping unparseable input as is
pub fn format_display_date(raw: &str) -> String {
    match parse_calendar_date(raw) {
        Some(date) => date.format("%-d %b %Y").to_string(),
        None => raw.trim().to_string(),
    }
}

/// Format a start/end pair for display
///
/// Missing halves are dropped; both missing yields an empty string.
pub fn format_date_range(start: &str, end: &str) -> String {
    let start = format_display_date(start);
    let end = format_display_date(end);

    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => format!("until {}", end),
        (false, false) => format!("{} - {}", start, end),
    }
}
