use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use reqwest::Url;

/// Collaborator base URL used when neither `--api-url` nor `TIMELINE_API_URL` is set
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Per-request timeout used when neither `--timeout-secs` nor `TIMELINE_TIMEOUT_SECS` is set
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const APP_DIR_NAME: &str = "timeline-explorer";
const LOG_FILE_NAME: &str = "timeline-explorer.log";

/// Validate a collaborator base URL and strip any trailing slash.
///
/// # Errors
///
/// Returns an error if the URL does not parse or its scheme is not http/https.
pub fn resolve_api_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("API base URL is empty");
    }

    let url = Url::parse(trimmed).with_context(|| format!("Invalid API base URL: {}", trimmed))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("Unsupported URL scheme '{}' (expected http or https)", other),
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Log file used while the TUI owns the terminal
pub fn log_file_path() -> Result<PathBuf> {
    let cache = dirs::cache_dir().context("Could not determine the platform cache directory")?;
    Ok(cache.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}
