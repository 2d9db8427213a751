use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use sweepstake_types::{Effect, Msg, Screen};

use super::components::{
    Component, HintBarComponent, LoadingComponent, PickerComponent, PromptComponent, ResultComponent,
};
use super::layout::MainLayout;
use crate::app::App;

/// Root component: routes keys to the active screen and draws the frame.
#[derive(Debug, Default)]
pub struct MainView {
    picker_view: PickerComponent,
    prompt_view: PromptComponent,
    loading_view: LoadingComponent,
    result_view: ResultComponent,
    hint_bar: HintBarComponent,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    fn content_view(&mut self, screen: Screen) -> &mut dyn Component {
        match screen {
            Screen::EnvironmentSelect | Screen::ActionSelect => &mut self.picker_view,
            Screen::ParameterPrompt => &mut self.prompt_view,
            Screen::Loading => &mut self.loading_view,
            Screen::Result => &mut self.result_view,
        }
    }

    fn content_hints(&self, app: &App) -> Vec<Span<'static>> {
        match app.screen {
            Screen::EnvironmentSelect | Screen::ActionSelect => self.picker_view.get_hint_spans(app),
            Screen::ParameterPrompt => self.prompt_view.get_hint_spans(app),
            Screen::Loading => self.loading_view.get_hint_spans(app),
            Screen::Result => self.result_view.get_hint_spans(app),
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        app.update(msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }

        // An invocation cannot be cancelled once started.
        if app.is_loading() {
            return Vec::new();
        }

        if key.code == KeyCode::Char('q') && key.modifiers.is_empty() && !app.is_filtering() {
            return vec![Effect::Quit];
        }

        self.content_view(app.screen).handle_key_events(app, key)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().surface));
        frame.render_widget(background, area);

        let [content, hints] = MainLayout::areas(area);
        self.content_view(app.screen).render(frame, content, app);

        let spans = self.get_hint_spans(app);
        self.hint_bar.render(frame, hints, spans);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled("Hints: ", app.ctx.theme.text_muted_style())];
        spans.extend(self.content_hints(app));
        spans
    }
}
