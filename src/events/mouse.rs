//! Mouse event handling.

use crossterm::event::{MouseEvent, MouseEventKind};

use super::Action;

/// Rows moved per wheel notch
const WHEEL_ROWS: usize = 3;

/// Handle mouse events and return the appropriate action.
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::ScrollUp(WHEEL_ROWS),
        MouseEventKind::ScrollDown => Action::ScrollDown(WHEEL_ROWS),
        _ => Action::None,
    }
}
