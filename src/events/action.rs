//! Action enum for decoupling input handling from state changes.

/// Actions that can be dispatched from event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,

    // === Scrolling ===
    /// Scroll up by n rows
    ScrollUp(usize),
    /// Scroll down by n rows
    ScrollDown(usize),
    /// Scroll to top
    ScrollToTop,
    /// Scroll to bottom
    ScrollToBottom,

    /// Terminal size changed
    Resized,

    /// No action
    None,
}

impl Action {
    /// Whether this action moves the view and should be reported as a
    /// scroll event.
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            Action::ScrollUp(_)
                | Action::ScrollDown(_)
                | Action::ScrollToTop
                | Action::ScrollToBottom
                | Action::Resized
        )
    }
}
