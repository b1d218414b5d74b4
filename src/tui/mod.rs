//! Interactive timeline browser.
//!
//! - `app` - Session state: query line, background fetches, view selection
//! - `events` - Key to action mapping
//! - `layout` - Screen regions
//! - `rendering` - Frame drawing for the four views, stats panel and detail overlay
//! - `terminal` - Raw-mode guard

mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use std::sync::Arc;

use anyhow::Result;
pub use app::App;
use tracing::info;

use self::terminal::TerminalGuard;
use crate::client::EntrySource;

/// Run the interactive TUI against `source` until the user quits
pub fn run_interactive(source: Arc<dyn EntrySource>) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;

    let mut app = App::new(source);
    let res = app.run(guard.terminal_mut());

    guard.restore()?;
    info!("interactive session ended");
    res
}
