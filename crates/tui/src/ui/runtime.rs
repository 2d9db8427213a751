//! Runtime: event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (raw mode, alternate screen).
//! - Drive a single loop that handles input, animation ticks and finished
//!   invocations.
//! - Route keys through `MainView` and execute the returned `Effect`s.
//!
//! Event Loop Strategy
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a channel.
//! - Smart ticking: fast interval (100 ms) only while the spinner is visible;
//!   long interval (5 s) when idle.
//! - Invocations run as Tokio tasks; their handles are polled through a
//!   `FuturesUnordered` in the same `select!`, so the UI keeps animating
//!   while a call is in flight.
use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use sweepstake_lambda::RemoteInvoker;
use sweepstake_types::{Effect, InvocationResult, Msg, PayloadOptions};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::app::App;
use crate::cmd;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
///
/// The thread ends when reading fails or the receiver is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(100);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Tui, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Execute effects. Returns `true` when the application should exit.
fn process_effects(
    invoker: &RemoteInvoker,
    effects: Vec<Effect>,
    pending: &mut FuturesUnordered<JoinHandle<InvocationResult>>,
) -> bool {
    if effects.is_empty() {
        return false;
    }
    let batch = cmd::from_effects(effects);
    pending.extend(cmd::run_cmds(invoker, batch.commands));
    batch.quit
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop and restores the terminal on every exit path.
pub async fn run_app(invoker: RemoteInvoker, payload_options: PayloadOptions) -> Result<()> {
    let mut app = App::new(theme::load(), payload_options);
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &invoker).await;
    let cleanup = cleanup_terminal(&mut terminal);
    outcome.and(cleanup)
}

async fn event_loop(terminal: &mut Tui, app: &mut App, main_view: &mut MainView, invoker: &RemoteInvoker) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut pending: FuturesUnordered<JoinHandle<InvocationResult>> = FuturesUnordered::new();

    // Ticking strategy: fast while animating, very slow when idle.
    let fast_interval = Duration::from_millis(100);
    let idle_interval = Duration::from_millis(5000);
    let mut current_interval = idle_interval;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;
    info!("sweepstake TUI started");

    loop {
        let needs_animation = app.is_loading();
        let target_interval = if needs_animation { fast_interval } else { idle_interval };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let mut effects = Vec::new();
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                effects.extend(handle_input_event(app, main_view, event));
                needs_render = true;
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(app, &Msg::Tick));
                needs_render = needs_animation;
            }

            Some(joined) = pending.next(), if !pending.is_empty() => {
                let result = joined.unwrap_or_else(cmd::join_failure);
                effects.extend(main_view.handle_message(app, &Msg::InvocationCompleted(Box::new(result))));
                needs_render = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if process_effects(invoker, effects, &mut pending) {
            info!("quit requested");
            break;
        }

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }

    // In-flight invocations are abandoned on exit.
    for handle in pending.iter() {
        handle.abort();
    }
    Ok(())
}
