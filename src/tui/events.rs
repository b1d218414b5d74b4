use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    /// Close overlay, else clear the query, else quit
    Escape,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Apply directives, open a post, toggle a year or layer, load more
    Activate,
    CycleFocus,
    CycleView,
    ToggleStats,
    CopyUrl,
    Refresh,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Escape,

        // Navigation (Vim/Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        // Actions
        (KeyCode::Enter, _) => Action::Activate,
        (KeyCode::Tab, _) => Action::CycleFocus,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Action::CycleView,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::ToggleStats,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyUrl,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,

        // Query input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
