//! Derived views over the ordered pipeline output.
//!
//! - [`grouping`] - Year and year-month partitions
//! - [`pagination`] - Growing page window with an idempotent `load_more`
//! - [`viewport`] - Render cap for the timeline view and its per-layer lanes
//! - [`rows`] - Flattened, selectable rows for each of the four view modes
//!
//! Nothing here reorders or refilters beyond what each view documents; the
//! pipeline's order is the input.

pub mod grouping;
pub mod pagination;
pub mod rows;
pub mod viewport;

pub use grouping::{EntryGroup, group_by_year, group_by_year_month};
pub use pagination::{CARD_PAGE_SIZE, MAGAZINE_PAGE_SIZE, Paginator};
pub use rows::{ViewMode, ViewRow, ViewState, ViewSummary};
pub use viewport::{CappedView, DEFAULT_MAX_RENDERED_ITEMS, LayerLane, ViewportCap, layer_lanes};
