pub mod dates;
pub mod environment;
pub mod terminal;

pub use dates::{MISSING_DATE, format_long, format_short, format_year_month};
pub use environment::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, log_file_path, resolve_api_base};
pub use terminal::{sanitize, strip_ansi_codes, truncate_chars};
