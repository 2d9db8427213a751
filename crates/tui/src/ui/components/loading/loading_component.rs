use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Braille spinner frames, advanced by `Msg::Tick` while loading.
pub static FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner and status text shown while an invocation runs.
///
/// Loading ignores every key except the global quit, so it has no key
/// handling of its own.
#[derive(Debug, Default)]
pub struct LoadingComponent;

impl LoadingComponent {
    fn status_lines(app: &App) -> Vec<Line<'static>> {
        let theme = &*app.ctx.theme;
        let environment = app.selected_environment.map(|e| e.short_name()).unwrap_or_default();
        let action = app.selected_action.map(|a| a.as_str()).unwrap_or_default();
        let frame = FRAMES[app.throbber_idx % FRAMES.len()];

        vec![
            Line::from(vec![
                Span::styled(format!("{frame} "), theme.accent_emphasis_style()),
                Span::styled(
                    format!("Invoking Lambda in {environment} environment with action {action}..."),
                    theme.text_primary_style(),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Please wait, this may take a few moments...",
                theme.text_muted_style(),
            )),
        ]
    }
}

impl Component for LoadingComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Working"), false);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let lines = Self::status_lines(app);
        let [_, body, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(lines.len() as u16), Constraint::Fill(1)])
                .areas(inner);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Ctrl+C", " Quit ")])
    }
}
