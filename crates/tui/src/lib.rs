//! # Sweepstake TUI Library
//!
//! Interactive terminal menu for the sweepstake rewards calculator. The user
//! picks an environment and an action, enters a quest ID or a duration, and
//! the tool invokes the Lambda and shows its response and logs.
//!
//! ## Architecture
//!
//! `App` holds all state and the screen transitions. Each screen is drawn
//! and driven by a component. Components return `Effect`s; the runtime turns
//! them into commands, runs invocations in the background and feeds the
//! results back as messages.

mod app;
mod cmd;
mod ui;

use anyhow::Result;
use sweepstake_lambda::RemoteInvoker;
use sweepstake_types::PayloadOptions;

/// Runs the interactive menu until the user quits.
///
/// # Errors
///
/// Returns an error for terminal setup failures (raw mode, alternate
/// screen) and drawing failures. Invocation failures are shown on screen
/// and never end the program.
pub async fn run(invoker: RemoteInvoker, payload_options: PayloadOptions) -> Result<()> {
    ui::runtime::run_app(invoker, payload_options).await
}
