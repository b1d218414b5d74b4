//! Command-line entry points: `browse` (default), `list`, `layers`, `stats`, `show`.

mod commands;

pub use commands::{Cli, Commands, ListArgs, format_list_line, run};
