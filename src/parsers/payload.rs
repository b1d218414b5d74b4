use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::{Entry, LayerInfo, Stats};

/// Parse the `entries` array of a `/timeline` response
pub fn parse_timeline_body(body: &Value) -> Result<Vec<Entry>> {
    parse_items(body, "entries")
}

/// Parse the `results` array of a `/search` response
pub fn parse_search_body(body: &Value) -> Result<Vec<Entry>> {
    parse_items(body, "results")
}

/// Parse the `layers` array of a `/layers` response
pub fn parse_layers_body(body: &Value) -> Result<Vec<LayerInfo>> {
    parse_items(body, "layers")
}

/// Parse a `/stats` response
pub fn parse_stats_body(body: &Value) -> Result<Stats> {
    if !body.is_object() {
        bail!("Stats response is not a JSON object");
    }
    serde_json::from_value(body.clone()).context("Failed to decode stats response")
}

/// Decode every element of `body[key]`, skipping malformed elements.
///
/// Returns an error if the array is missing or more than half of its elements
/// fail to decode, which points at a contract mismatch rather than bad records.
fn parse_items<T: DeserializeOwned>(body: &Value, key: &str) -> Result<Vec<T>> {
    let items = body
        .get(key)
        .and_then(Value::as_array)
        .with_context(|| format!("Response is missing the '{}' array", key))?;

    let mut parsed = Vec::with_capacity(items.len());
    let mut skipped_count = 0;

    for (idx, item) in items.iter().enumerate() {
        if !item.is_object() {
            warn!(index = idx, key, "skipping non-object element");
            skipped_count += 1;
            continue;
        }
        match serde_json::from_value::<T>(item.clone()) {
            Ok(value) => parsed.push(value),
            Err(e) => {
                warn!(index = idx, key, error = %e, "skipping malformed element");
                skipped_count += 1;
            }
        }
    }

    if !items.is_empty() {
        let failure_rate = (skipped_count as f64) / (items.len() as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many malformed '{}' elements: {} of {} failed ({:.1}%)",
                key,
                skipped_count,
                items.len(),
                failure_rate * 100.0
            );
        }
    }

    Ok(parsed)
}
