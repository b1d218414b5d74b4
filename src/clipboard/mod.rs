use anyhow::{Context, Result, bail};
use arboard::Clipboard;

use crate::detail::post_url;
use crate::models::Entry;

/// Longest URL accepted for copying
const MAX_URL_LEN: usize = 2048;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Validates a URL before touching the system clipboard
fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        bail!("Cannot copy an empty URL");
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        bail!("Refusing to copy non-http URL: {}", url);
    }
    if url.len() > MAX_URL_LEN {
        bail!("URL too long for clipboard ({} bytes, max {})", url.len(), MAX_URL_LEN);
    }
    Ok(())
}

fn copy_with_provider(url: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_url(url)?;
    provider.set_text(url)
}

/// Copy the derived external URL of `entry` to the system clipboard.
///
/// Returns the copied URL.
///
/// # Errors
/// Returns error if:
/// - The URL fails validation
/// - System clipboard is unavailable (headless environment) or locked
pub fn copy_post_url(entry: &Entry) -> Result<String> {
    let url = post_url(entry);
    validate_url(&url)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(&url, &mut clipboard)?;
    Ok(url)
}
