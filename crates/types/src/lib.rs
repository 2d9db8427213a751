//! Shared types for the sweepstake rewards tool.
//!
//! The domain records (`Environment`, `Action`, `InvocationPayload`,
//! `InvocationResult`) live in [`invocation`]; this module adds the
//! messages and effects exchanged between the TUI controller and the
//! runtime that executes side effects.

pub mod invocation;

pub use invocation::{Action, Environment, InvocationPayload, InvocationResult, InvokeError, PayloadOptions, parse_positive};

/// The screen currently driving rendering and input handling.
///
/// Exactly one screen is active at a time. The flow starts at
/// `EnvironmentSelect` and never reaches a terminal state; only quitting
/// ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Pick development or production.
    #[default]
    EnvironmentSelect,
    /// Pick start, process or complete.
    ActionSelect,
    /// Enter the quest ID or duration for the chosen action.
    ParameterPrompt,
    /// An invocation is in flight; input is ignored.
    Loading,
    /// Output, error and logs of the last invocation.
    Result,
}

/// Messages that update application state outside of key handling.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Periodic UI tick (spinner animation)
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Background invocation finished
    InvocationCompleted(Box<InvocationResult>),
}

/// Side effects requested by state transitions.
///
/// The controller never performs I/O itself; it returns effects and the
/// runtime turns them into commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the session check and Lambda invocation in the background
    Invoke {
        environment: Environment,
        payload: Box<InvocationPayload>,
    },
    /// Leave the event loop and restore the terminal
    Quit,
}
