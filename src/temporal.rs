// ⏰ Temporal Helpers - "Today" is always an explicit input
//
// Analytics take `today` as a parameter. Only the `*_now` convenience
// wrappers read the clock, and they read it in UTC. Local time zones are
// never applied.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};

const ISO_DATE: &str = "%Y-%m-%d";

/// Current calendar day in UTC
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format as `YYYY-MM-DD`
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE)
        .with_context(|| format!("Invalid ISO date: {:?}", value))
}

/// Whole calendar days from `earlier` to `later` (negative if reversed)
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// The calendar day before `date`
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

/// Pluralised page count: "1 page" | "3 pages"
pub fn format_pages(pages: u64) -> String {
    format!("{} {}", pages, if pages == 1 { "page" } else { "pages" })
}

/// Human-friendly relative date: "Never" | "Today" | "Yesterday" | "Jan 5".
///
/// Accepts a date or a timestamp; only the leading `YYYY-MM-DD` is used.
/// Unparseable input is returned as-is.
pub fn format_relative_date(value: Option<&str>, today: NaiveDate) -> String {
    let value = match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => return "Never".to_string(),
    };

    let date_part = value.get(..10).unwrap_or(value);
    let date = match NaiveDate::parse_from_str(date_part, ISO_DATE) {
        Ok(d) => d,
        Err(_) => return value.to_string(),
    };

    if date == today {
        "Today".to_string()
    } else if date == previous_day(today) {
        "Yesterday".to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}
