use std::collections::BTreeMap;

use crate::models::Entry;

/// Default render cap for the timeline view
pub const DEFAULT_MAX_RENDERED_ITEMS: usize = 200;

/// Hard cap on how many entries one view renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportCap {
    pub max_rendered_items: usize,
}

impl Default for ViewportCap {
    fn default() -> Self {
        Self { max_rendered_items: DEFAULT_MAX_RENDERED_ITEMS }
    }
}

/// Capped slice of the pipeline output plus the counts the view must surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappedView<'a> {
    /// Most recent dated entries, newest first, at most `max_rendered_items`
    pub entries: Vec<&'a Entry>,
    /// Dated entries before capping
    pub total: usize,
}

impl CappedView<'_> {
    pub fn shown(&self) -> usize {
        self.entries.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.shown() < self.total
    }
}

/// One lane of the timeline view: a layer and how many capped entries carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerLane {
    pub layer: String,
    pub count: usize,
}

impl ViewportCap {
    pub fn new(max_rendered_items: usize) -> Self {
        Self { max_rendered_items }
    }

    /// Keep the most recent dated entries, applied after the pipeline.
    ///
    /// Undated entries cannot be placed on a timeline and are dropped before counting.
    pub fn apply<'a>(&self, entries: &'a [Entry]) -> CappedView<'a> {
        let mut dated: Vec<&Entry> = entries.iter().filter(|e| e.is_dated()).collect();
        let total = dated.len();
        dated.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
        dated.truncate(self.max_rendered_items);
        CappedView { entries: dated, total }
    }
}

/// Lanes for every layer present in `entries`, ordered by layer id
pub fn layer_lanes(entries: &[&Entry]) -> Vec<LayerLane> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for layer in &entry.layers {
            *counts.entry(layer.as_str()).or_default() += 1;
        }
    }
    counts.into_iter().map(|(layer, count)| LayerLane { layer: layer.to_string(), count }).collect()
}
