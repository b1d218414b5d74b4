use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Queries shorter than this (in characters, after trimming) fall back to the timeline fetch
pub const MIN_SEARCH_LEN: usize = 2;

/// Ordering applied by the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] =
        [SortKey::NewestFirst, SortKey::OldestFirst, SortKey::TitleAsc, SortKey::TitleDesc];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "newest",
            SortKey::OldestFirst => "oldest",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "Newest first",
            SortKey::OldestFirst => "Oldest first",
            SortKey::TitleAsc => "Title A-Z",
            SortKey::TitleDesc => "Title Z-A",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "newest" | "date-desc" | "newest-first" => Ok(SortKey::NewestFirst),
            "oldest" | "date-asc" | "oldest-first" => Ok(SortKey::OldestFirst),
            "title-asc" | "title" | "az" => Ok(SortKey::TitleAsc),
            "title-desc" | "za" => Ok(SortKey::TitleDesc),
            _ => Err(anyhow!(
                "Unknown sort key: '{}' (valid: newest, oldest, title-asc, title-desc)",
                s
            )),
        }
    }
}

/// Inclusive year bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl DateRange {
    pub fn new(start_year: Option<i32>, end_year: Option<i32>) -> Result<Self> {
        if let (Some(start), Some(end)) = (start_year, end_year)
            && start > end
        {
            bail!("Start year {} is after end year {}", start, end);
        }
        Ok(Self { start_year, end_year })
    }

    pub fn is_active(&self) -> bool {
        self.start_year.is_some() || self.end_year.is_some()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start_year.is_none_or(|start| year >= start)
            && self.end_year.is_none_or(|end| year <= end)
    }
}

/// Where the pipeline's source collection comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRequest {
    /// `GET /timeline` for the selected layers (empty = unfiltered)
    Timeline { layers: Vec<String> },
    /// `GET /search` for a query already filtered server-side by layers
    Search { query: String, layers: Vec<String> },
}

/// Current filter/sort/search parameters.
///
/// Treated as an immutable value: every user edit builds a new state through the
/// `with_*` methods and the pipeline is recomputed from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub selected_layers: BTreeSet<String>,
    pub search_query: String,
    pub date_range: DateRange,
    pub sort: SortKey,
    pub selected_categories: BTreeSet<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_layers = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Add the layer if absent, remove it otherwise
    pub fn toggle_layer(mut self, layer: &str) -> Self {
        if !self.selected_layers.remove(layer) {
            self.selected_layers.insert(layer.to_string());
        }
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Search query if it is long enough to be sent to the collaborator
    pub fn effective_search(&self) -> Option<&str> {
        let trimmed = self.search_query.trim();
        (trimmed.chars().count() >= MIN_SEARCH_LEN).then_some(trimmed)
    }

    /// Which collaborator call supplies the source collection for this state
    pub fn source_request(&self) -> SourceRequest {
        let layers: Vec<String> = self.selected_layers.iter().cloned().collect();
        match self.effective_search() {
            Some(query) => SourceRequest::Search { query: query.to_string(), layers },
            None => SourceRequest::Timeline { layers },
        }
    }
}
