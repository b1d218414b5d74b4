use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::{EntrySource, FetchError};
use crate::models::{Entry, LayerInfo, Stats};
use crate::parsers::{parse_layers_body, parse_search_body, parse_stats_body, parse_timeline_body};
use crate::utils::resolve_api_base;

const USER_AGENT: &str = concat!("timeline-explorer/", env!("CARGO_PKG_VERSION"));

/// Blocking JSON-over-HTTP client for the collaborator backend
#[derive(Debug, Clone)]
pub struct HttpEntrySource {
    client: Client,
    base_url: String,
}

impl HttpEntrySource {
    /// Build a client for `base_url` with a per-request `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = resolve_api_base(base_url).map_err(|e| FetchError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Transport { endpoint: base_url.clone(), source })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` with repeated query pairs and decode the body as JSON
    fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, params = query.len(), "collaborator request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|source| FetchError::Transport { endpoint: endpoint.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

fn layer_params(layers: &[String]) -> Vec<(&str, &str)> {
    layers.iter().map(|layer| ("layers", layer.as_str())).collect()
}

fn decode<T>(endpoint: &str, result: anyhow::Result<T>) -> Result<T, FetchError> {
    result.map_err(|e| FetchError::Decode { endpoint: endpoint.to_string(), reason: format!("{:#}", e) })
}

impl EntrySource for HttpEntrySource {
    fn fetch_layers(&self) -> Result<Vec<LayerInfo>, FetchError> {
        let body = self.get_json("/layers", &[])?;
        decode("/layers", parse_layers_body(&body))
    }

    fn fetch_timeline(&self, layers: &[String]) -> Result<Vec<Entry>, FetchError> {
        let body = self.get_json("/timeline", &layer_params(layers))?;
        decode("/timeline", parse_timeline_body(&body))
    }

    fn search(&self, query: &str, layers: &[String]) -> Result<Vec<Entry>, FetchError> {
        let mut params = vec![("q", query)];
        params.extend(layer_params(layers));
        let body = self.get_json("/search", &params)?;
        decode("/search", parse_search_body(&body))
    }

    fn fetch_stats(&self) -> Result<Stats, FetchError> {
        let body = self.get_json("/stats", &[])?;
        decode("/stats", parse_stats_body(&body))
    }
}
