//! Shared test utilities for integration tests
#![allow(dead_code)]

use serde_json::{Value, json};
use timeline_explorer::Entry;

/// Builder for test entries
#[derive(Clone)]
pub struct EntryBuilder {
    path: String,
    title: String,
    date: Option<String>,
    layers: Vec<String>,
    snippet: String,
}

impl EntryBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            path: format!("/outputs/posts/1_{}.md", title.replace(' ', "_")),
            title: title.to_string(),
            date: None,
            layers: vec![],
            snippet: String::new(),
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn with_layers(mut self, layers: &[&str]) -> Self {
        self.layers = layers.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.snippet = snippet.to_string();
        self
    }

    pub fn build(self) -> Entry {
        Entry {
            path: self.path,
            title: self.title,
            date: self.date,
            layers: self.layers,
            snippet: self.snippet,
        }
    }

    /// Wire form as served by the backend
    pub fn to_json(&self) -> Value {
        json!({
            "path": self.path,
            "title": self.title,
            "date": self.date,
            "layers": self.layers,
            "snippet": self.snippet,
        })
    }
}

/// `GET /timeline` body
pub fn timeline_body(entries: &[EntryBuilder]) -> Value {
    json!({ "entries": entries.iter().map(EntryBuilder::to_json).collect::<Vec<_>>() })
}

/// `GET /search` body
pub fn search_body(entries: &[EntryBuilder]) -> Value {
    json!({ "results": entries.iter().map(EntryBuilder::to_json).collect::<Vec<_>>() })
}

/// `GET /layers` body with two layers
pub fn layers_body() -> Value {
    json!({
        "layers": [
            { "name": "observability", "count": 12, "earliest": "2016-02-01", "latest": "2024-06-30" },
            { "name": "data", "count": 30, "earliest": "2012-01-15", "latest": "2025-01-02" }
        ]
    })
}

/// `GET /stats` body
pub fn stats_body() -> Value {
    json!({
        "total_posts": 42,
        "date_range": { "earliest": "2012-01-15", "latest": "2025-01-02" },
        "posts_per_year": { "2020": 10, "2021": 20, "2022": 12 },
        "layer_distribution": { "observability": 12, "data-infrastructure": 30 },
        "multi_layer_posts": 7,
        "avg_layers_per_post": 1.31
    })
}

/// Entries from an undated/dated mix used across pipeline tests
pub fn mixed_entries() -> Vec<Entry> {
    vec![
        EntryBuilder::new("B").with_date("2021-05-01").build(),
        EntryBuilder::new("A").with_date("2019-01-01").build(),
        EntryBuilder::new("C").build(),
    ]
}

pub fn titles(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}
