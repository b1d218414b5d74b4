//! JSON decoding for collaborator responses
//!
//! # Error Handling Strategy
//!
//! Decoding follows a **graceful degradation** approach:
//!
//! - **Field-level problems**: Null, missing or mistyped fields inside an entry are
//!   tolerated by the lenient deserializers in [`deserializers`] and never reject a record.
//!
//! - **Element-level problems**: Array elements that are not objects (or fail to decode)
//!   are logged with `tracing::warn!` and skipped.
//!
//! - **Contract mismatch**: A missing envelope key, or more than 50% of elements failing,
//!   is reported as an error so the caller keeps its previous data instead of showing a
//!   half-empty result.

pub mod deserializers;
pub mod payload;

pub use payload::{parse_layers_body, parse_search_body, parse_stats_body, parse_timeline_body};
