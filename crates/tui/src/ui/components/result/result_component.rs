use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use sweepstake_types::{Effect, InvocationResult};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

pub const SUMMARY_HEADING: &str = "Lambda Execution Summary:";
pub const LOGS_HEADING: &str = "--- Lambda Logs ---";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLineKind {
    Heading,
    Error,
    Output,
    LogsHeading,
    Log,
    Blank,
}

/// One display row of the result screen, already wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    pub kind: ResultLineKind,
    pub text: String,
}

impl ResultLine {
    fn blank() -> Self {
        Self {
            kind: ResultLineKind::Blank,
            text: String::new(),
        }
    }
}

/// Lay out a result as display rows wrapped to `width` columns.
///
/// The heading is `Error: <err>` for a failed invocation and the summary
/// heading otherwise. The logs section only appears when logs were returned.
pub fn build_result_lines(result: &InvocationResult, width: usize) -> Vec<ResultLine> {
    let width = width.max(1);
    let mut lines = Vec::new();

    match &result.error {
        Some(error) => push_wrapped(&mut lines, ResultLineKind::Error, &format!("Error: {error}"), width),
        None => push_wrapped(&mut lines, ResultLineKind::Heading, SUMMARY_HEADING, width),
    }
    lines.push(ResultLine::blank());

    for output in &result.output_lines {
        push_wrapped(&mut lines, ResultLineKind::Output, output, width);
    }

    if !result.logs.is_empty() {
        lines.push(ResultLine::blank());
        push_wrapped(&mut lines, ResultLineKind::LogsHeading, LOGS_HEADING, width);
        lines.push(ResultLine::blank());
        push_wrapped(&mut lines, ResultLineKind::Log, &result.logs, width);
    }
    lines
}

fn push_wrapped(lines: &mut Vec<ResultLine>, kind: ResultLineKind, text: &str, width: usize) {
    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(ResultLine {
                kind,
                text: String::new(),
            });
            continue;
        }
        lines.extend(textwrap::wrap(raw, width).into_iter().map(|piece| ResultLine {
            kind,
            text: piece.into_owned(),
        }));
    }
}

fn line_style(theme: &dyn Theme, kind: ResultLineKind) -> Style {
    match kind {
        ResultLineKind::Heading => theme.status_success().add_modifier(Modifier::BOLD),
        ResultLineKind::Error => theme.status_error().add_modifier(Modifier::BOLD),
        ResultLineKind::LogsHeading => theme.accent_secondary_style().add_modifier(Modifier::BOLD),
        ResultLineKind::Log => theme.text_secondary_style(),
        ResultLineKind::Output | ResultLineKind::Blank => theme.text_primary_style(),
    }
}

/// Scrollable view of the last invocation result.
///
/// Remembers the geometry of the last frame so key handling can clamp the
/// scroll offset against the same wrapping the user sees.
#[derive(Debug, Default)]
pub struct ResultComponent {
    wrap_width: usize,
    viewport_height: usize,
}

impl ResultComponent {
    fn max_offset(&self, app: &App) -> usize {
        let total = app
            .result
            .as_ref()
            .map(|result| build_result_lines(result, self.wrap_width).len())
            .unwrap_or_default();
        total.saturating_sub(self.viewport_height)
    }

    fn page(&self) -> isize {
        isize::try_from(self.viewport_height.max(1)).unwrap_or(isize::MAX)
    }
}

impl Component for ResultComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let max = self.max_offset(app);
        match key.code {
            KeyCode::Char('b') => app.back_to_actions(),
            KeyCode::Up | KeyCode::Char('k') => app.result_scroll.scroll_by(-1, max),
            KeyCode::Down | KeyCode::Char('j') => app.result_scroll.scroll_by(1, max),
            KeyCode::PageUp => app.result_scroll.scroll_by(-self.page(), max),
            KeyCode::PageDown => app.result_scroll.scroll_by(self.page(), max),
            KeyCode::Home | KeyCode::Char('g') => app.result_scroll.to_top(),
            KeyCode::End | KeyCode::Char('G') => app.result_scroll.to_bottom(max),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Result"), true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        self.wrap_width = usize::from(inner.width);
        self.viewport_height = usize::from(inner.height);

        let Some(result) = app.result.as_ref() else {
            return;
        };
        let rows = build_result_lines(result, self.wrap_width);
        let max = rows.len().saturating_sub(self.viewport_height);
        let offset = app.result_scroll.offset.min(max);

        let lines: Vec<Line> = rows
            .into_iter()
            .skip(offset)
            .take(self.viewport_height)
            .map(|row| Line::from(Span::styled(row.text, line_style(theme, row.kind))))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if max > 0 {
            let mut state = ScrollbarState::new(max).position(offset).viewport_content_length(self.viewport_height);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Style::default().fg(theme.roles().scrollbar_thumb))
                .track_style(Style::default().fg(theme.roles().scrollbar_track));
            frame.render_stateful_widget(scrollbar, rect.inner(Margin::new(0, 1)), &mut state);
        }
        app.result_scroll.offset = offset;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        vec![
            Span::styled("Press ", theme.text_muted_style()),
            Span::styled("'b'", theme.accent_emphasis_style()),
            Span::styled(" to go back or ", theme.text_muted_style()),
            Span::styled("'q'", theme.accent_emphasis_style()),
            Span::styled(" to quit", theme.text_muted_style()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use crossterm::event::KeyModifiers;
    use sweepstake_types::{InvokeError, PayloadOptions, Screen};

    fn texts(lines: &[ResultLine]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn success_layout_with_logs() {
        let result = InvocationResult {
            output_lines: vec!["Environment: dev".into(), "Response: {\n  \"ok\": true\n}".into()],
            logs: "START\nEND\n".into(),
            error: None,
        };
        let lines = build_result_lines(&result, 80);
        assert_eq!(
            texts(&lines),
            vec![
                SUMMARY_HEADING,
                "",
                "Environment: dev",
                "Response: {",
                "  \"ok\": true",
                "}",
                "",
                LOGS_HEADING,
                "",
                "START",
                "END",
            ]
        );
        assert_eq!(lines[0].kind, ResultLineKind::Heading);
        assert_eq!(lines[9].kind, ResultLineKind::Log);
    }

    #[test]
    fn error_heading_and_no_logs_section() {
        let result = InvocationResult {
            output_lines: vec!["Environment: prod".into()],
            logs: String::new(),
            error: Some(InvokeError::Invoke("AccessDenied".into())),
        };
        let lines = build_result_lines(&result, 80);
        assert_eq!(texts(&lines), vec!["Error: failed to invoke Lambda: AccessDenied", "", "Environment: prod"]);
        assert_eq!(lines[0].kind, ResultLineKind::Error);
    }

    #[test]
    fn long_lines_wrap_to_width() {
        let result = InvocationResult {
            output_lines: vec!["alpha beta gamma delta".into()],
            ..InvocationResult::default()
        };
        let lines = build_result_lines(&result, 11);
        assert_eq!(
            texts(&lines),
            vec!["Lambda", "Execution", "Summary:", "", "alpha beta", "gamma delta"]
        );
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut app = App::new(Box::new(DraculaTheme::new()), PayloadOptions::default());
        app.screen = Screen::Result;
        app.result = Some(InvocationResult {
            output_lines: (0..20).map(|i| format!("line {i}")).collect(),
            ..InvocationResult::default()
        });
        let mut component = ResultComponent {
            wrap_width: 40,
            viewport_height: 10,
        };
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        component.handle_key_events(&mut app, key(KeyCode::End));
        assert_eq!(app.result_scroll.offset, 12);
        component.handle_key_events(&mut app, key(KeyCode::PageDown));
        assert_eq!(app.result_scroll.offset, 12);
        component.handle_key_events(&mut app, key(KeyCode::PageUp));
        assert_eq!(app.result_scroll.offset, 2);
        component.handle_key_events(&mut app, key(KeyCode::Home));
        assert_eq!(app.result_scroll.offset, 0);

        component.handle_key_events(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.screen, Screen::ActionSelect);
        assert!(app.result.is_none());
    }
}
