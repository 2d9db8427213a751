//! Application state and flow control for the sweepstake TUI.
//!
//! `App` is the interactive flow controller. It owns every piece of UI
//! state for the lifetime of the process and moves between screens:
//!
//! ```text
//! EnvironmentSelect -> ActionSelect -> ParameterPrompt -> Loading -> Result
//!                           ^                |                         |
//!                           +------- Esc ----+---------- 'b' ----------+
//! ```
//!
//! Transitions never perform I/O. Starting an invocation returns an
//! [`Effect::Invoke`] for the runtime to execute; the outcome comes back as
//! [`Msg::InvocationCompleted`]. Only the Loading screen waits for that
//! message, so at most one invocation is in flight.

use sweepstake_types::{
    Action, Effect, Environment, InvocationPayload, InvocationResult, Msg, PayloadOptions, Screen, parse_positive,
};
use tracing::{debug, info};

use crate::ui::components::picker::{PickerItem, PickerState};
use crate::ui::components::prompt::PromptState;
use crate::ui::components::result::ResultScroll;
use crate::ui::theme::Theme;

pub const VALIDATION_MESSAGE: &str = "Please enter a valid positive number";

/// Number of frames in the loading spinner.
pub const THROBBER_FRAMES: usize = 10;

/// Cross-cutting context shared by all components.
#[derive(Debug)]
pub struct SharedCtx {
    /// Active color theme
    pub theme: Box<dyn Theme>,
    /// Extras merged into every payload
    pub payload_options: PayloadOptions,
}

#[derive(Debug)]
pub struct App {
    /// Currently active screen
    pub screen: Screen,
    /// Shared, cross-cutting context (theme, payload extras)
    pub ctx: SharedCtx,
    pub environments: PickerState<Environment>,
    pub actions: PickerState<Action>,
    pub prompt: PromptState,
    pub selected_environment: Option<Environment>,
    pub selected_action: Option<Action>,
    /// Outcome of the last invocation, shown on the Result screen
    pub result: Option<InvocationResult>,
    pub result_scroll: ResultScroll,
    /// Animation frame for the loading spinner
    pub throbber_idx: usize,
}

impl App {
    pub fn new(theme: Box<dyn Theme>, payload_options: PayloadOptions) -> Self {
        let environments = PickerState::new(
            "Select Environment",
            Environment::ALL
                .into_iter()
                .map(|environment| PickerItem {
                    value: environment,
                    title: environment.label(),
                    description: environment.description(),
                })
                .collect(),
        );
        let actions = PickerState::new(
            "Rewards Tools",
            Action::ALL
                .into_iter()
                .map(|action| PickerItem {
                    value: action,
                    title: action.label(),
                    description: action.description(),
                })
                .collect(),
        );
        Self {
            screen: Screen::EnvironmentSelect,
            ctx: SharedCtx { theme, payload_options },
            environments,
            actions,
            prompt: PromptState::default(),
            selected_environment: None,
            selected_action: None,
            result: None,
            result_scroll: ResultScroll::default(),
            throbber_idx: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.screen == Screen::Loading
    }

    /// Whether a list filter is capturing typed characters, including `q`.
    pub fn is_filtering(&self) -> bool {
        match self.screen {
            Screen::EnvironmentSelect => self.environments.is_filtering(),
            Screen::ActionSelect => self.actions.is_filtering(),
            _ => false,
        }
    }

    /// EnvironmentSelect -> ActionSelect with the highlighted environment.
    pub fn confirm_environment(&mut self) {
        if self.screen != Screen::EnvironmentSelect {
            return;
        }
        let Some(environment) = self.environments.selected_value() else {
            return;
        };
        debug!(%environment, "environment selected");
        self.selected_environment = Some(environment);
        self.screen = Screen::ActionSelect;
    }

    /// ActionSelect -> ParameterPrompt with the highlighted action.
    pub fn confirm_action(&mut self) {
        if self.screen != Screen::ActionSelect {
            return;
        }
        let Some(action) = self.actions.selected_value() else {
            return;
        };
        debug!(%action, "action selected");
        self.selected_action = Some(action);
        self.prompt.reset();
        self.screen = Screen::ParameterPrompt;
    }

    /// Question shown on the prompt for the selected action.
    pub fn prompt_label(&self) -> &'static str {
        self.selected_action.map(Action::prompt_label).unwrap_or_default()
    }

    /// Flip the dry run toggle when the selected action supports it.
    pub fn toggle_dry_run(&mut self) {
        if self.screen == Screen::ParameterPrompt && self.selected_action.is_some_and(Action::supports_dry_run) {
            self.prompt.dry_run = !self.prompt.dry_run;
        }
    }

    /// Validate the prompt input and, when valid, start the invocation.
    ///
    /// Invalid input keeps the prompt open with a validation message and
    /// builds no payload.
    pub fn submit_parameter(&mut self) -> Vec<Effect> {
        if self.screen != Screen::ParameterPrompt {
            return Vec::new();
        }
        let (Some(environment), Some(action)) = (self.selected_environment, self.selected_action) else {
            return Vec::new();
        };
        let Some(value) = parse_positive(self.prompt.input.input()) else {
            debug!(input = self.prompt.input.input(), "rejected prompt input");
            self.prompt.message = Some(VALIDATION_MESSAGE.to_string());
            return Vec::new();
        };

        let payload = InvocationPayload::new(action, value)
            .with_dry_run(self.prompt.dry_run)
            .with_options(&self.ctx.payload_options);
        info!(%environment, %action, value, "starting invocation");
        self.prompt.message = None;
        self.throbber_idx = 0;
        self.screen = Screen::Loading;
        vec![Effect::Invoke {
            environment,
            payload: Box::new(payload),
        }]
    }

    /// ParameterPrompt -> ActionSelect without invoking.
    pub fn cancel_prompt(&mut self) {
        if self.screen != Screen::ParameterPrompt {
            return;
        }
        self.selected_action = None;
        self.prompt.reset();
        self.screen = Screen::ActionSelect;
    }

    /// Result -> ActionSelect, discarding the action, input and result.
    /// The environment and list selections are kept.
    pub fn back_to_actions(&mut self) {
        if self.screen != Screen::Result {
            return;
        }
        self.selected_action = None;
        self.prompt.reset();
        self.result = None;
        self.result_scroll = ResultScroll::default();
        self.screen = Screen::ActionSelect;
    }

    /// Apply a non-key message.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                if self.is_loading() {
                    self.throbber_idx = (self.throbber_idx + 1) % THROBBER_FRAMES;
                }
            }
            // Layout is recomputed from the frame on the next draw.
            Msg::Resize(width, height) => debug!(width, height, "terminal resized"),
            Msg::InvocationCompleted(result) => {
                if !self.is_loading() {
                    debug!("dropping invocation result outside of the loading screen");
                    return Vec::new();
                }
                info!(success = result.is_success(), lines = result.output_lines.len(), "invocation completed");
                self.result = Some(result.as_ref().clone());
                self.result_scroll = ResultScroll::default();
                self.screen = Screen::Result;
            }
        }
        Vec::new()
    }
}
