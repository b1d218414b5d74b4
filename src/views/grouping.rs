use std::collections::BTreeMap;

use crate::models::Entry;

/// Entries sharing one date prefix (`YYYY` or `YYYY-MM`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryGroup<'a> {
    pub key: String,
    pub entries: Vec<&'a Entry>,
}

impl EntryGroup<'_> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partition dated entries by year, newest year first.
///
/// Inside a group entries are ordered by date descending whatever the active sort
/// key; entries on the same day keep their incoming order.
pub fn group_by_year(entries: &[Entry]) -> Vec<EntryGroup<'_>> {
    let mut groups = partition(entries, Entry::year_key);
    for group in &mut groups {
        group.entries.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
    }
    groups
}

/// Partition dated entries by `YYYY-MM`, newest month first.
///
/// Membership only: entries keep the order they had in `entries`.
pub fn group_by_year_month(entries: &[Entry]) -> Vec<EntryGroup<'_>> {
    partition(entries, Entry::year_month_key)
}

fn partition<'a>(
    entries: &'a [Entry],
    key_of: impl Fn(&'a Entry) -> Option<&'a str>,
) -> Vec<EntryGroup<'a>> {
    let mut buckets: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();
    for entry in entries {
        if let Some(key) = key_of(entry) {
            buckets.entry(key).or_default().push(entry);
        }
    }

    buckets
        .into_iter()
        .rev()
        .map(|(key, entries)| EntryGroup { key: key.to_string(), entries })
        .collect()
}
