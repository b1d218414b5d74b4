//! Layer lookup: static display configuration keyed by layer id.
//!
//! Lookups first normalise legacy spellings (`data` → `data-infrastructure`) and then
//! fall back to [`DEFAULT_LAYER`], so [`resolve`] is total over every string input.

pub mod config;

pub use config::{DEFAULT_LAYER, LAYERS, LEGACY_LAYER_MAP, LayerConfig};

/// Map a legacy layer id to its current spelling; identity otherwise
pub fn normalize_layer_id(layer_id: &str) -> &str {
    LEGACY_LAYER_MAP
        .iter()
        .find(|(legacy, _)| *legacy == layer_id)
        .map(|(_, current)| *current)
        .unwrap_or(layer_id)
}

/// Display configuration for any layer id
pub fn resolve(layer_id: &str) -> &'static LayerConfig {
    let normalized = normalize_layer_id(layer_id);
    LAYERS.iter().find(|config| config.id == normalized).unwrap_or(&DEFAULT_LAYER)
}

/// Configured display name, or the raw id when the layer is unknown
pub fn layer_name(layer_id: &str) -> String {
    let config = resolve(layer_id);
    if config.id == DEFAULT_LAYER.id && layer_id != DEFAULT_LAYER.id {
        layer_id.to_string()
    } else {
        config.name.to_string()
    }
}

/// Configured layer ids in canonical order
pub fn layer_ids() -> Vec<&'static str> {
    LAYERS.iter().map(|config| config.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_layer() {
        let config = resolve("observability");
        assert_eq!(config.name, "Observability");
    }

    #[test]
    fn test_resolve_unknown_returns_default() {
        assert_eq!(resolve("nonexistent-id"), &DEFAULT_LAYER);
        assert_eq!(resolve(""), &DEFAULT_LAYER);
    }

    #[test]
    fn test_resolve_legacy_alias() {
        assert_eq!(resolve("data"), resolve("data-infrastructure"));
        assert_eq!(resolve("api/backend").id, "backend-apis");
        assert_eq!(resolve("security").id, "platform-tooling");
    }

    #[test]
    fn test_normalize_is_identity_for_current_ids() {
        assert_eq!(normalize_layer_id("performance"), "performance");
        assert_eq!(normalize_layer_id("whatever"), "whatever");
    }

    #[test]
    fn test_layer_name() {
        assert_eq!(layer_name("data"), "Data Infrastructure");
        assert_eq!(layer_name("uncategorized"), "Uncategorized");
        assert_eq!(layer_name("quantum"), "quantum");
    }

    #[test]
    fn test_layer_ids_canonical_order() {
        let ids = layer_ids();
        assert_eq!(ids.len(), 9);
        assert_eq!(ids[0], "backend-apis");
        assert_eq!(ids[8], "cloud-infrastructure");
    }
}
