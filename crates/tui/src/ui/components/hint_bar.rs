//! Single-line key hint bar rendered under every screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

#[derive(Debug, Default)]
pub struct HintBarComponent;

impl HintBarComponent {
    pub fn render(&self, frame: &mut Frame, area: Rect, spans: Vec<Span<'static>>) {
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
