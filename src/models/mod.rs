//! Data models for the post timeline.
//!
//! - [`Entry`] - One post as served by the collaborator
//! - [`LayerInfo`] - Per-layer counts and date bounds from `/layers`
//! - [`Stats`] - Aggregate analytics from `/stats`
//! - [`QueryState`] - The user's current filter/sort/search selection
//!
//! Entries use lenient serde deserializers (see `parsers::deserializers`) so that a
//! malformed field never rejects the whole record.

pub mod entry;
pub mod query;
pub mod stats;

pub use entry::{Entry, LayerInfo, UNCATEGORIZED};
pub use query::{DateRange, MIN_SEARCH_LEN, QueryState, SortKey, SourceRequest};
pub use stats::{DateSpan, Stats};
