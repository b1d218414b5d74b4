use chrono::NaiveDate;

use crate::models::Entry;

/// Shown wherever an entry has no usable date
pub const MISSING_DATE: &str = "N/A";

/// Compact list format: "Mar 5, 2021"
pub fn format_short(entry: &Entry) -> String {
    format_with(entry.parsed_date(), "%b %-d, %Y")
}

/// Detail overlay format: "March 5, 2021"
pub fn format_long(entry: &Entry) -> String {
    format_with(entry.parsed_date(), "%B %-d, %Y")
}

/// Magazine section header for a `YYYY-MM` key: "March 2021"
pub fn format_year_month(key: &str) -> String {
    let date = NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d").ok();
    format_with(date, "%B %Y")
}

fn format_with(date: Option<NaiveDate>, pattern: &str) -> String {
    date.map(|d| d.format(pattern).to_string()).unwrap_or_else(|| MISSING_DATE.to_string())
}
