//! Keyboard event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Action;

/// Handle keyboard events and return the appropriate action.
///
/// `page_rows` is the distance moved by PageUp/PageDown.
pub fn handle_key_event(key: KeyEvent, page_rows: usize) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp(1),
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown(1),
        KeyCode::PageUp => Action::ScrollUp(page_rows.max(1)),
        KeyCode::PageDown | KeyCode::Char(' ') => Action::ScrollDown(page_rows.max(1)),
        KeyCode::Home | KeyCode::Char('g') => Action::ScrollToTop,
        KeyCode::End | KeyCode::Char('G') => Action::ScrollToBottom,

        _ => Action::None,
    }
}
