//! Terminal event handling.
//!
//! Keyboard and mouse events are translated into [`Action`]s, which the main
//! loop applies to the app.

mod action;
mod keyboard;
mod mouse;

pub use action::Action;

use crossterm::event::{Event, KeyEventKind};

use keyboard::handle_key_event;
use mouse::handle_mouse_event;

/// Translate a crossterm event into an action.
pub fn handle_event(event: &Event, page_rows: usize) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(*key, page_rows),
        Event::Mouse(mouse) => handle_mouse_event(*mouse),
        Event::Resize(_, _) => Action::Resized,
        _ => Action::None,
    }
}
