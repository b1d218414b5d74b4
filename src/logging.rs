//! Tracing subscriber setup.
//!
//! The filter comes from `TIMELINE_LOG` (same syntax as `RUST_LOG`) and defaults
//! to `warn`. CLI commands log to stderr. The TUI owns the terminal, so it logs to
//! a file under the platform cache directory instead.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::utils::log_file_path;

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "TIMELINE_LOG";

const DEFAULT_FILTER: &str = "warn,arboard=off";

/// Where log records go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open `path` for appending, creating missing parent directories
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
///
/// A log file that cannot be opened disables logging rather than failing the session.
pub fn init(target: LogTarget) {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File => {
            let Ok(path) = log_file_path() else {
                return;
            };
            let Ok(file) = open_log_file(&path) else {
                return;
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }
}
