//! Component trait for the sweepstake TUI.
//!
//! Each screen is drawn and driven by a component. Components translate key
//! events into `App` transitions and report side effects as `Effect`s; the
//! transitions themselves live on `App` so they can be exercised without a
//! terminal.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use sweepstake_types::{Effect, Msg};

use crate::app::App;

/// A UI element with its own input handling and rendering.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: `handle_key_events()` runs while the component's
///    screen is active
/// 2. **Messages**: `handle_message()` receives ticks, resizes and completions
/// 3. **Rendering**: `render()` draws into the area it is given; it must not
///    change flow state
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events while this component's screen is active.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while the component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }
}
