use std::cmp::Ordering;

use chrono::NaiveDate;
use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

use crate::models::{DateRange, Entry, QueryState, SortKey};

/// Run the client-side stages over the collaborator's source collection.
///
/// Stages, in order:
/// 1. Date-range clip (no-op when both bounds are open)
/// 2. Category filter (no-op when no category is selected)
/// 3. Stable sort by the state's sort key, undated entries last for every key
///
/// Source selection (timeline vs search) happens before this, when the collection
/// is fetched; see [`QueryState::source_request`].
pub fn run_pipeline(entries: &[Entry], state: &QueryState) -> Vec<Entry> {
    let clipped = entries
        .iter()
        .filter(|entry| within_range(entry, &state.date_range))
        .filter(|entry| matches_categories(entry, state))
        .cloned()
        .collect();
    sort_entries(clipped, state.sort)
}

/// Keep an entry unless an active range excludes it.
///
/// Undated (null or unparseable) entries are excluded as soon as either bound is set.
pub fn within_range(entry: &Entry, range: &DateRange) -> bool {
    if !range.is_active() {
        return true;
    }
    entry.year().is_some_and(|year| range.contains(year))
}

/// AND-filter on the bracketed title category; inert when nothing is selected
pub fn matches_categories(entry: &Entry, state: &QueryState) -> bool {
    if state.selected_categories.is_empty() {
        return true;
    }
    entry.category().is_some_and(|category| state.selected_categories.contains(category))
}

/// Stable sort; entries that compare equal keep their incoming order
pub fn sort_entries(entries: Vec<Entry>, sort: SortKey) -> Vec<Entry> {
    let mut keyed: Vec<SortRecord> = entries.into_iter().map(SortRecord::new).collect();
    let collator = title_collator();
    keyed.sort_by(|a, b| compare_records(a, b, sort, collator.as_ref()));
    keyed.into_iter().map(|record| record.entry).collect()
}

/// Entry decorated with its parsed sort keys so they are computed once
struct SortRecord {
    date: Option<NaiveDate>,
    title: String,
    entry: Entry,
}

impl SortRecord {
    fn new(entry: Entry) -> Self {
        Self { date: entry.parsed_date(), title: entry.title.trim().to_string(), entry }
    }
}

fn compare_records(
    a: &SortRecord,
    b: &SortRecord,
    sort: SortKey,
    collator: Option<&Collator>,
) -> Ordering {
    // Undated entries go last regardless of direction
    match (a.date.is_some(), b.date.is_some()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    match sort {
        SortKey::NewestFirst => b.date.cmp(&a.date),
        SortKey::OldestFirst => a.date.cmp(&b.date),
        SortKey::TitleAsc => compare_titles(&a.title, &b.title, collator),
        SortKey::TitleDesc => compare_titles(&b.title, &a.title, collator),
    }
}

/// Root-locale collator with tertiary strength and non-ignorable punctuation,
/// so `"[Ops]" < "2020" < "Edge" < "Émile" < "Zuul"` and `"apple" < "Apple"`.
fn title_collator() -> Option<Collator> {
    match Collator::try_new(&Default::default(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "title collator unavailable, sorting titles case-insensitively");
            None
        }
    }
}

fn compare_titles(a: &str, b: &str, collator: Option<&Collator>) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}
