//! Layout system for the sweepstake TUI.
//!
//! Every screen shares the same frame: a content panel inset from the
//! terminal edges and a single hint line below it.
use ratatui::prelude::*;

pub(crate) struct MainLayout;

impl MainLayout {
    /// Split the screen into `[content, hints]`.
    ///
    /// The content panel keeps a margin of two columns and one row. On very
    /// small terminals the content shrinks first; the hint line stays.
    pub fn areas(size: Rect) -> [Rect; 2] {
        let inset = size.inner(Margin::new(2, 1));
        Layout::vertical([
            Constraint::Min(1),    // content
            Constraint::Length(1), // hints
        ])
        .areas(inset)
    }
}
