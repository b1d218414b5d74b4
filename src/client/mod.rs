//! Collaborator backend access.
//!
//! [`EntrySource`] is the seam between the presentation layer and the backend that
//! serves entries, layers, search results and statistics. [`HttpEntrySource`] is the
//! JSON-over-HTTP implementation; tests and the session layer can substitute any
//! other implementation.

mod http;

pub use http::HttpEntrySource;
use thiserror::Error;

use crate::models::{Entry, LayerInfo, SourceRequest, Stats};

/// Failure of one collaborator call
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Supplier of the raw entry collection and layer catalog
pub trait EntrySource: Send + Sync {
    /// `GET /layers`
    fn fetch_layers(&self) -> Result<Vec<LayerInfo>, FetchError>;

    /// `GET /timeline`; empty `layers` means unfiltered
    fn fetch_timeline(&self, layers: &[String]) -> Result<Vec<Entry>, FetchError>;

    /// `GET /search`, filtered server-side by `layers`
    fn search(&self, query: &str, layers: &[String]) -> Result<Vec<Entry>, FetchError>;

    /// `GET /stats`
    fn fetch_stats(&self) -> Result<Stats, FetchError>;

    /// Fetch whichever collection `request` selects
    fn fetch_source(&self, request: &SourceRequest) -> Result<Vec<Entry>, FetchError> {
        match request {
            SourceRequest::Timeline { layers } => self.fetch_timeline(layers),
            SourceRequest::Search { query, layers } => self.search(query, layers),
        }
    }
}
