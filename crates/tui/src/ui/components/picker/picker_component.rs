use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};
use sweepstake_types::{Effect, Screen};

use super::state::PickerState;
use crate::app::App;
use crate::ui::components::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

/// What a key press asked the picker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerOutcome {
    None,
    Confirm,
}

/// Renders and drives whichever list the current screen shows.
#[derive(Debug, Default)]
pub struct PickerComponent;

impl PickerComponent {
    fn handle_picker_key<T: Copy>(picker: &mut PickerState<T>, key: KeyEvent) -> PickerOutcome {
        if picker.is_filtering() {
            match key.code {
                KeyCode::Esc => picker.clear_filter(),
                KeyCode::Enter => picker.accept_filter(),
                KeyCode::Backspace => picker.pop_filter_char(),
                KeyCode::Up => picker.select_previous(),
                KeyCode::Down => picker.select_next(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => picker.push_filter_char(c),
                _ => {}
            }
            return PickerOutcome::None;
        }

        match key.code {
            KeyCode::Enter => return PickerOutcome::Confirm,
            KeyCode::Up | KeyCode::Char('k') => picker.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => picker.select_next(),
            KeyCode::Char('/') => picker.start_filter(),
            KeyCode::Esc if picker.has_filter() => picker.clear_filter(),
            _ => {}
        }
        PickerOutcome::None
    }

    fn render_picker<T: Copy>(frame: &mut Frame, area: Rect, picker: &mut PickerState<T>, theme: &dyn Theme) {
        let block = th::block(theme, Some(picker.title()), true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let show_filter = picker.is_filtering() || picker.has_filter();
        let [filter_area, list_area] =
            Layout::vertical([Constraint::Length(if show_filter { 2 } else { 0 }), Constraint::Min(1)]).areas(inner);

        if show_filter {
            let mut spans = vec![
                Span::styled("Filter: ", theme.text_secondary_style()),
                Span::styled(picker.filter_text().to_string(), theme.text_primary_style()),
            ];
            if picker.is_filtering() {
                spans.push(Span::styled("\u{258F}", theme.accent_primary_style()));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), filter_area);
        }

        let visible = picker.visible();
        if visible.is_empty() {
            frame.render_widget(Paragraph::new(Span::styled("No items.", theme.text_muted_style())), list_area);
            return;
        }

        let selected = picker.selected_index();
        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let is_selected = index == selected;
                let (marker, title_style, description_style) = if is_selected {
                    (
                        Span::styled("\u{2502} ", theme.accent_primary_style()),
                        theme.accent_emphasis_style(),
                        theme.accent_primary_style(),
                    )
                } else {
                    (
                        Span::raw("  "),
                        theme.text_primary_style().add_modifier(Modifier::BOLD),
                        theme.text_muted_style(),
                    )
                };
                ListItem::new(vec![
                    Line::from(vec![marker.clone(), Span::styled(item.title, title_style)]),
                    Line::from(vec![marker, Span::styled(item.description, description_style)]),
                    Line::default(),
                ])
            })
            .collect();
        drop(visible);

        let list = List::new(items);
        frame.render_stateful_widget(list, list_area, &mut picker.list_state);
    }
}

impl Component for PickerComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match app.screen {
            Screen::EnvironmentSelect => {
                if Self::handle_picker_key(&mut app.environments, key) == PickerOutcome::Confirm {
                    app.confirm_environment();
                }
            }
            Screen::ActionSelect => {
                if Self::handle_picker_key(&mut app.actions, key) == PickerOutcome::Confirm {
                    app.confirm_action();
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        match app.screen {
            Screen::EnvironmentSelect => Self::render_picker(frame, rect, &mut app.environments, theme),
            Screen::ActionSelect => Self::render_picker(frame, rect, &mut app.actions, theme),
            _ => {}
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        if app.is_filtering() {
            th::build_hint_spans(theme, &[(" Enter", " Apply filter  "), (" Esc", " Clear filter ")])
        } else {
            th::build_hint_spans(
                theme,
                &[(" \u{2191}/\u{2193}", " Navigate  "), (" Enter", " Select  "), (" /", " Filter  "), (" q", " Quit ")],
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;
    use sweepstake_types::{Environment, PayloadOptions};

    fn app() -> App {
        App::new(Box::new(DraculaTheme::new()), PayloadOptions::default())
    }

    fn press(component: &mut PickerComponent, app: &mut App, code: KeyCode) {
        component.handle_key_events(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrow_and_enter_select_production() {
        let mut app = app();
        let mut component = PickerComponent;
        press(&mut component, &mut app, KeyCode::Down);
        press(&mut component, &mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::ActionSelect);
        assert_eq!(app.selected_environment, Some(Environment::Production));
    }

    #[test]
    fn filter_then_confirm() {
        let mut app = app();
        let mut component = PickerComponent;
        press(&mut component, &mut app, KeyCode::Char('/'));
        for c in "prod".chars() {
            press(&mut component, &mut app, KeyCode::Char(c));
        }
        assert!(app.is_filtering());
        press(&mut component, &mut app, KeyCode::Enter);
        assert!(!app.is_filtering());
        assert_eq!(app.screen, Screen::EnvironmentSelect);
        press(&mut component, &mut app, KeyCode::Enter);
        assert_eq!(app.selected_environment, Some(Environment::Production));
    }

    #[test]
    fn escape_clears_filter() {
        let mut app = app();
        let mut component = PickerComponent;
        press(&mut component, &mut app, KeyCode::Char('/'));
        press(&mut component, &mut app, KeyCode::Char('x'));
        assert!(app.environments.visible().is_empty());
        press(&mut component, &mut app, KeyCode::Esc);
        assert_eq!(app.environments.visible().len(), 2);
        press(&mut component, &mut app, KeyCode::Enter);
        assert_eq!(app.selected_environment, Some(Environment::Development));
    }
}
