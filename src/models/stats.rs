use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateSpan {
    #[serde(default)]
    pub earliest: Option<String>,
    #[serde(default)]
    pub latest: Option<String>,
}

/// Aggregate counts served by `GET /stats`; display-only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_posts: usize,
    #[serde(default)]
    pub date_range: DateSpan,
    #[serde(default)]
    pub posts_per_year: BTreeMap<String, usize>,
    #[serde(default)]
    pub layer_distribution: BTreeMap<String, usize>,
    #[serde(default)]
    pub multi_layer_posts: usize,
    #[serde(default)]
    pub avg_layers_per_post: f64,
}

impl Stats {
    /// Years between the earliest and latest post
    pub fn timeline_span_years(&self) -> i32 {
        let year = |d: &Option<String>| d.as_deref().and_then(|s| s.get(..4)?.parse::<i32>().ok());
        match (year(&self.date_range.earliest), year(&self.date_range.latest)) {
            (Some(earliest), Some(latest)) => latest - earliest,
            _ => 0,
        }
    }

    /// Most active years, highest count first
    pub fn top_years(&self, n: usize) -> Vec<(&str, usize)> {
        top_counts(&self.posts_per_year, n)
    }

    /// Largest layers, highest count first
    pub fn top_layers(&self, n: usize) -> Vec<(&str, usize)> {
        top_counts(&self.layer_distribution, n)
    }
}

fn top_counts(map: &BTreeMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = map.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    // Stable: equal counts stay in key order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts
}
