use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use sweepstake_types::Effect;

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::theme_helpers as th;

/// Numeric input for the quest ID or the duration in minutes.
#[derive(Debug, Default)]
pub struct PromptComponent;

impl Component for PromptComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter => return app.submit_parameter(),
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Tab => app.toggle_dry_run(),
            KeyCode::Backspace => app.prompt.input.backspace(),
            KeyCode::Delete => app.prompt.input.delete(),
            KeyCode::Left => app.prompt.input.move_left(),
            KeyCode::Right => app.prompt.input.move_right(),
            KeyCode::Home => app.prompt.input.move_home(),
            KeyCode::End => app.prompt.input.move_end(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                app.prompt.input.insert_char(c);
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let action = app.selected_action.map(|action| action.as_str()).unwrap_or_default();
        let environment = app.selected_environment.map(|environment| environment.label()).unwrap_or_default();

        let block = th::block(theme, Some(environment), true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let [label_area, _, input_area, message_area, _, toggle_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let label = Line::from(Span::styled(
            format!("{} ({action}):", app.prompt_label()),
            theme.text_primary_style(),
        ));
        frame.render_widget(Paragraph::new(label), label_area);

        let valid = app.prompt.message.is_none();
        let input = Line::from(vec![
            Span::styled("> ", theme.accent_primary_style()),
            Span::styled(app.prompt.input.input().to_string(), th::input_style(theme, valid)),
        ]);
        frame.render_widget(Paragraph::new(input), input_area);

        if let Some(message) = &app.prompt.message {
            let line = Line::from(Span::styled(message.clone(), theme.status_error()));
            frame.render_widget(Paragraph::new(line), message_area);
        }

        if app.selected_action.is_some_and(|action| action.supports_dry_run()) {
            let (mark, style) = if app.prompt.dry_run {
                ("[x]", theme.status_warning())
            } else {
                ("[ ]", theme.text_muted_style())
            };
            let line = Line::from(vec![Span::styled(mark, style), Span::styled(" Dry run", theme.text_secondary_style())]);
            frame.render_widget(Paragraph::new(line), toggle_area);
        }

        let column = u16::try_from(app.prompt.input.cursor_column()).unwrap_or(u16::MAX);
        let x = input_area.x.saturating_add(2).saturating_add(column);
        frame.set_cursor_position((x.min(input_area.right().saturating_sub(1)), input_area.y));
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        if app.selected_action.is_some_and(|action| action.supports_dry_run()) {
            th::build_hint_spans(theme, &[(" Enter", " Submit  "), (" Tab", " Dry run  "), (" Esc", " Back ")])
        } else {
            th::build_hint_spans(theme, &[(" Enter", " Submit  "), (" Esc", " Back ")])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use sweepstake_types::{PayloadOptions, Screen};

    fn prompt_app() -> App {
        let mut app = App::new(Box::new(DraculaTheme::new()), PayloadOptions::default());
        app.confirm_environment();
        app.actions.select_next();
        app.confirm_action();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typed_digits_submit_an_invocation() {
        let mut app = prompt_app();
        let mut component = PromptComponent;
        for c in "42".chars() {
            component.handle_key_events(&mut app, key(KeyCode::Char(c)));
        }
        component.handle_key_events(&mut app, key(KeyCode::Tab));
        let effects = component.handle_key_events(&mut app, key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Loading);
        match effects.as_slice() {
            [Effect::Invoke { payload, .. }] => {
                assert_eq!(payload.quest_id(), Some(42));
                assert!(payload.dry_run());
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn editing_keys_move_within_input() {
        let mut app = prompt_app();
        let mut component = PromptComponent;
        for c in "123".chars() {
            component.handle_key_events(&mut app, key(KeyCode::Char(c)));
        }
        component.handle_key_events(&mut app, key(KeyCode::Left));
        component.handle_key_events(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.prompt.input.input(), "13");
        component.handle_key_events(&mut app, key(KeyCode::Home));
        component.handle_key_events(&mut app, key(KeyCode::Delete));
        assert_eq!(app.prompt.input.input(), "3");
    }

    #[test]
    fn escape_cancels_without_effects() {
        let mut app = prompt_app();
        let mut component = PromptComponent;
        component.handle_key_events(&mut app, key(KeyCode::Char('7')));
        let effects = component.handle_key_events(&mut app, key(KeyCode::Esc));
        assert!(effects.is_empty());
        assert_eq!(app.screen, Screen::ActionSelect);
    }
}
