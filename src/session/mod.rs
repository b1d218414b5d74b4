//! Request coordination for the interactive session.
//!
//! - [`tokens`] - Per-purpose request tokens; late responses are discarded
//! - [`debounce`] - Single pending task fired after a quiet period
//! - [`fetcher`] - Background collaborator calls delivered over a channel

pub mod debounce;
pub mod fetcher;
pub mod tokens;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use fetcher::{FetchPayload, FetchResponse, Fetcher};
pub use tokens::{RequestPurpose, RequestToken, RequestTracker};
