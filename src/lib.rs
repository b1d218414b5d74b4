//! Timeline Explorer - Browse an engineering blog timeline from the terminal
//!
//! This library is the client-side presentation layer over a timeline backend
//! that serves posts tagged with architecture layers. It supports:
//!
//! - Fetching the timeline, search results, layer catalog and statistics
//! - Clipping, filtering and stably sorting entries on the client
//! - Grouping by year and month, windowed pagination and a render cap
//! - Deriving a post's external URL from its path and title
//! - An interactive TUI with debounced search and stale-response guarding
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use timeline_explorer::client::{EntrySource, HttpEntrySource};
//! use timeline_explorer::{QueryState, SortKey, run_pipeline};
//!
//! let source = HttpEntrySource::new("http://localhost:8000", Duration::from_secs(10))?;
//! let state = QueryState::new().with_layers(["observability"]).with_sort(SortKey::OldestFirst);
//! let entries = source.fetch_source(&state.source_request())?;
//! for entry in run_pipeline(&entries, &state) {
//!     println!("{}", entry.title);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod detail;
pub mod layers;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod session;
pub mod tui;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use detail::post_url;
pub use layers::resolve;
pub use models::{DateRange, Entry, LayerInfo, QueryState, SortKey, Stats};
pub use pipeline::run_pipeline;
