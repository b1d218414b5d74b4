use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Layer id used when an entry carries no layers at all
pub const UNCATEGORIZED: &str = "uncategorized";

const DATE_FORMAT: &str = "%Y-%m-%d";

static CATEGORY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("category tag pattern is valid"));

/// One timeline post as served by the collaborator.
///
/// Every field is lenient: a missing title or snippet becomes empty, a non-string
/// date becomes `None`, and non-string layer ids are dropped. A date string that
/// does not parse as `YYYY-MM-DD` is kept verbatim but ranks as undated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub path: String,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_date")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_layers")]
    pub layers: Vec<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub snippet: String,
}

impl Entry {
    /// Calendar date, or `None` when absent or unparseable
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(|d| NaiveDate::parse_from_str(d.trim(), DATE_FORMAT).ok())
    }

    /// Year of a valid date
    pub fn year(&self) -> Option<i32> {
        self.parsed_date().map(|d| d.year())
    }

    /// `true` when the entry takes part in date-ordered and date-grouped views
    pub fn is_dated(&self) -> bool {
        self.parsed_date().is_some()
    }

    /// First layer, used for single-colour display
    pub fn primary_layer(&self) -> &str {
        self.layers.first().map(String::as_str).unwrap_or(UNCATEGORIZED)
    }

    /// Bracketed `[Category]` tag from the title, if any
    pub fn category(&self) -> Option<&str> {
        CATEGORY_TAG.captures(&self.title).and_then(|c| c.get(1)).map(|m| m.as_str())
    }

    /// 4-character year prefix of a valid date
    pub fn year_key(&self) -> Option<&str> {
        self.dated_prefix(4)
    }

    /// 7-character `YYYY-MM` prefix of a valid date
    pub fn year_month_key(&self) -> Option<&str> {
        self.dated_prefix(7)
    }

    fn dated_prefix(&self, len: usize) -> Option<&str> {
        if !self.is_dated() {
            return None;
        }
        self.date.as_deref().map(str::trim).and_then(|d| d.get(..len))
    }
}

/// Aggregate metadata about one layer, computed by the collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_date")]
    pub earliest: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_date")]
    pub latest: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, date: Option<&str>, layers: &[&str]) -> Entry {
        Entry {
            path: "/posts/1_post.md".to_string(),
            title: title.to_string(),
            date: date.map(str::to_string),
            layers: layers.iter().map(|l| l.to_string()).collect(),
            snippet: String::new(),
        }
    }

    #[test]
    fn test_parsed_date_valid() {
        let e = entry("A", Some("2021-05-01"), &[]);
        assert_eq!(e.parsed_date(), NaiveDate::from_ymd_opt(2021, 5, 1));
        assert_eq!(e.year(), Some(2021));
        assert!(e.is_dated());
    }

    #[test]
    fn test_parsed_date_malformed_is_undated() {
        let e = entry("A", Some("sometime in 2021"), &[]);
        assert_eq!(e.parsed_date(), None);
        assert!(!e.is_dated());
        assert_eq!(e.year_key(), None);
    }

    #[test]
    fn test_parsed_date_invalid_calendar_day() {
        let e = entry("A", Some("2021-02-30"), &[]);
        assert!(!e.is_dated());
    }

    #[test]
    fn test_year_and_month_keys() {
        let e = entry("A", Some("2019-11-23"), &[]);
        assert_eq!(e.year_key(), Some("2019"));
        assert_eq!(e.year_month_key(), Some("2019-11"));
    }

    #[test]
    fn test_primary_layer_fallback() {
        assert_eq!(entry("A", None, &[]).primary_layer(), UNCATEGORIZED);
        assert_eq!(entry("A", None, &["data", "performance"]).primary_layer(), "data");
    }

    #[test]
    fn test_category_tag() {
        assert_eq!(entry("[Culture] Hiring at scale", None, &[]).category(), Some("Culture"));
        assert_eq!(entry("No tag here", None, &[]).category(), None);
        assert_eq!(entry("[A] then [B]", None, &[]).category(), Some("A"));
    }
}
