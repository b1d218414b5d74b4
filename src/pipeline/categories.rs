use std::collections::BTreeSet;

use chrono::{Datelike, Utc};

use crate::models::Entry;

/// Lower year bound offered when no entry carries a valid date
pub const FALLBACK_MIN_YEAR: i32 = 2010;

/// Distinct bracketed title categories, sorted ascending
pub fn available_categories(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(Entry::category)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Min and max year among dated entries, for the range picker
pub fn year_bounds(entries: &[Entry]) -> (i32, i32) {
    let years = entries.iter().filter_map(Entry::year);
    let (min, max) = years.fold((None, None), |(min, max): (Option<i32>, Option<i32>), year| {
        (Some(min.map_or(year, |m| m.min(year))), Some(max.map_or(year, |m| m.max(year))))
    });
    (min.unwrap_or(FALLBACK_MIN_YEAR), max.unwrap_or_else(|| Utc::now().year()))
}
