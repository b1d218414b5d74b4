use std::collections::{BTreeSet, HashSet};

use super::grouping::{group_by_year, group_by_year_month};
use super::pagination::{CARD_PAGE_SIZE, MAGAZINE_PAGE_SIZE, Paginator};
use super::viewport::ViewportCap;
use crate::models::Entry;

/// Number of most recent years the grid view opens expanded
const DEFAULT_EXPANDED_YEARS: usize = 2;

/// The four interchangeable presentations of the pipeline output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Cards,
    Magazine,
    Grid,
    Timeline,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] =
        [ViewMode::Cards, ViewMode::Magazine, ViewMode::Grid, ViewMode::Timeline];

    /// Next mode in display order, wrapping around
    pub fn next(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Magazine,
            ViewMode::Magazine => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Timeline,
            ViewMode::Timeline => ViewMode::Cards,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Cards => "Cards",
            ViewMode::Magazine => "Magazine",
            ViewMode::Grid => "Grid",
            ViewMode::Timeline => "Timeline",
        }
    }
}

/// One selectable line of a rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRow<'a> {
    /// Group header. `key` is a `YYYY` or `YYYY-MM` prefix; `expanded` is set only
    /// for collapsible groups
    Section { key: String, count: usize, expanded: Option<bool> },
    Post(&'a Entry),
    /// Scroll sentinel; reaching it requests the next page
    LoadMore { remaining: usize },
    /// Everything is loaded
    End { total: usize },
}

/// Headline numbers shown above a view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewSummary {
    /// Entries the view can show at all (dated entries)
    pub total: usize,
    /// Entries currently rendered
    pub shown: usize,
    /// Distinct layers among `total`
    pub layers: usize,
    /// Distinct sections (years or months)
    pub periods: usize,
}

/// Per-view presentation state that survives recomputation of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub cards: Paginator,
    pub magazine: Paginator,
    pub expanded_years: BTreeSet<String>,
    pub cap: ViewportCap,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            cards: Paginator::new(CARD_PAGE_SIZE),
            magazine: Paginator::new(MAGAZINE_PAGE_SIZE),
            expanded_years: BTreeSet::new(),
            cap: ViewportCap::default(),
        }
    }
}

fn dated(entries: &[Entry]) -> Vec<&Entry> {
    entries.iter().filter(|e| e.is_dated()).collect()
}

fn distinct_layers(entries: &[&Entry]) -> usize {
    entries.iter().flat_map(|e| e.layers.iter()).collect::<HashSet<_>>().len()
}

impl ViewState {
    pub fn new(cap: ViewportCap) -> Self {
        Self { cap, ..Self::default() }
    }

    /// Prepare for a freshly applied result set: first page everywhere and the
    /// most recent years expanded
    pub fn reset_for(&mut self, entries: &[Entry]) {
        self.cards.reset();
        self.magazine.reset();
        self.expanded_years = group_by_year(entries)
            .into_iter()
            .take(DEFAULT_EXPANDED_YEARS)
            .map(|group| group.key)
            .collect();
    }

    pub fn toggle_year(&mut self, year: &str) {
        if !self.expanded_years.remove(year) {
            self.expanded_years.insert(year.to_string());
        }
    }

    fn paginator(&self) -> Option<&Paginator> {
        match self.mode {
            ViewMode::Cards => Some(&self.cards),
            ViewMode::Magazine => Some(&self.magazine),
            ViewMode::Grid | ViewMode::Timeline => None,
        }
    }

    /// Extend the active paginated view; `false` when nothing more can be shown
    /// or the view is not paginated
    pub fn load_more(&mut self, entries: &[Entry]) -> bool {
        let total = dated(entries).len();
        match self.mode {
            ViewMode::Cards => self.cards.load_more(total),
            ViewMode::Magazine => self.magazine.load_more(total),
            ViewMode::Grid | ViewMode::Timeline => false,
        }
    }

    pub fn summary(&self, entries: &[Entry]) -> ViewSummary {
        let dated = dated(entries);
        let total = dated.len();
        match self.mode {
            ViewMode::Cards | ViewMode::Magazine => ViewSummary {
                total,
                shown: self.paginator().map_or(total, |p| p.visible_len(total)),
                layers: distinct_layers(&dated),
                periods: group_by_year_month(entries).len(),
            },
            ViewMode::Grid => ViewSummary {
                total,
                shown: total,
                layers: distinct_layers(&dated),
                periods: group_by_year(entries).len(),
            },
            ViewMode::Timeline => {
                let capped = self.cap.apply(entries);
                ViewSummary {
                    total: capped.total,
                    shown: capped.shown(),
                    layers: distinct_layers(&capped.entries),
                    periods: group_by_year(entries).len(),
                }
            }
        }
    }

    /// Rows of the active view over the ordered pipeline output
    pub fn rows<'a>(&self, entries: &'a [Entry]) -> Vec<ViewRow<'a>> {
        match self.mode {
            ViewMode::Cards => self.card_rows(entries),
            ViewMode::Magazine => self.magazine_rows(entries),
            ViewMode::Grid => self.grid_rows(entries),
            ViewMode::Timeline => {
                self.cap.apply(entries).entries.into_iter().map(ViewRow::Post).collect()
            }
        }
    }

    fn card_rows<'a>(&self, entries: &'a [Entry]) -> Vec<ViewRow<'a>> {
        let dated = dated(entries);
        let mut rows: Vec<ViewRow> =
            self.cards.visible(&dated).iter().copied().map(ViewRow::Post).collect();
        push_tail(&mut rows, &self.cards, dated.len());
        rows
    }

    fn magazine_rows<'a>(&self, entries: &'a [Entry]) -> Vec<ViewRow<'a>> {
        let dated = dated(entries);
        let groups = group_by_year_month(entries);
        let mut rows = Vec::new();
        let mut current: Option<&str> = None;

        // Section header wherever the month changes in the visible window
        for &entry in self.magazine.visible(&dated) {
            if let Some(key) = entry.year_month_key()
                && current != Some(key)
            {
                let count = groups.iter().find(|g| g.key == key).map_or(0, |g| g.len());
                rows.push(ViewRow::Section { key: key.to_string(), count, expanded: None });
                current = Some(key);
            }
            rows.push(ViewRow::Post(entry));
        }

        push_tail(&mut rows, &self.magazine, dated.len());
        rows
    }

    fn grid_rows<'a>(&self, entries: &'a [Entry]) -> Vec<ViewRow<'a>> {
        let mut rows = Vec::new();
        for group in group_by_year(entries) {
            let expanded = self.expanded_years.contains(&group.key);
            rows.push(ViewRow::Section {
                key: group.key.clone(),
                count: group.len(),
                expanded: Some(expanded),
            });
            if expanded {
                rows.extend(group.entries.into_iter().map(ViewRow::Post));
            }
        }
        rows
    }
}

fn push_tail(rows: &mut Vec<ViewRow>, pager: &Paginator, total: usize) {
    if total == 0 {
        return;
    }
    if pager.has_more(total) {
        rows.push(ViewRow::LoadMore { remaining: total - pager.visible_len(total) });
    } else {
        rows.push(ViewRow::End { total });
    }
}
