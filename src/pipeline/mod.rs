pub mod apply;
pub mod categories;
pub mod directives;
pub mod parser;

pub use apply::{matches_categories, run_pipeline, sort_entries, within_range};
pub use categories::{FALLBACK_MIN_YEAR, available_categories, year_bounds};
pub use directives::{Directive, DirectiveField, QueryDirectives};
pub use parser::{parse_directives, split_query_line};
