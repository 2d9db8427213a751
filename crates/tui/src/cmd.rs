//! # Command Execution Layer
//!
//! Translates application effects (`Effect`) into commands (`Cmd`) and runs
//! them. This is where the pure state machine in `App` meets the outside
//! world:
//! - [`Cmd`] is the effectful command type.
//! - [`from_effects`] translates [`Effect`]s into [`Cmd`]s and notes whether
//!   a quit was requested.
//! - [`run_cmds`] spawns each command on the Tokio runtime and hands back
//!   the join handles for the event loop to poll.
//!
//! State updates stay pure; commands own the side effects.

use sweepstake_lambda::RemoteInvoker;
use sweepstake_types::{Effect, Environment, InvocationPayload, InvocationResult, InvokeError};
use tokio::task::{JoinError, JoinHandle, spawn};
use tracing::debug;

/// Side-effectful work executed outside of state updates.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Guard the SSO session and invoke the rewards calculator.
    Invoke {
        environment: Environment,
        payload: Box<InvocationPayload>,
    },
}

/// Commands derived from one batch of effects.
#[derive(Debug, Default)]
pub struct CommandBatch {
    pub commands: Vec<Cmd>,
    pub quit: bool,
}

/// Convert application [`Effect`]s into [`Cmd`]s.
pub fn from_effects(effects: Vec<Effect>) -> CommandBatch {
    let mut batch = CommandBatch::default();
    for effect in effects {
        match effect {
            Effect::Invoke { environment, payload } => batch.commands.push(Cmd::Invoke { environment, payload }),
            Effect::Quit => batch.quit = true,
        }
    }
    batch
}

/// Spawn every command and return the handles of the running tasks.
///
/// The event loop awaits these; results come back as
/// `Msg::InvocationCompleted`.
pub fn run_cmds(invoker: &RemoteInvoker, commands: Vec<Cmd>) -> Vec<JoinHandle<InvocationResult>> {
    commands
        .into_iter()
        .map(|command| match command {
            Cmd::Invoke { environment, payload } => {
                debug!(%environment, action = %payload.action(), "spawning invocation");
                let invoker = invoker.clone();
                spawn(async move { invoker.invoke(environment, &payload).await })
            }
        })
        .collect()
}

/// Turn a task that panicked or was cancelled into a failed result.
pub fn join_failure(error: JoinError) -> InvocationResult {
    InvocationResult {
        error: Some(InvokeError::Task(error.to_string())),
        ..InvocationResult::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use sweepstake_lambda::{
        CommandOutput, CommandRunner, EnvironmentTarget, InvokerConfig, LambdaResponse, LambdaTransport, SessionGuard,
    };
    use sweepstake_types::Action;

    struct AlwaysSignedIn;

    #[async_trait::async_trait]
    impl CommandRunner for AlwaysSignedIn {
        fn is_available(&self, _program: &str) -> bool {
            true
        }

        async fn status(&self, _program: &str, _args: &[&str]) -> std::io::Result<bool> {
            Ok(true)
        }

        async fn output(&self, _program: &str, _args: &[&str]) -> std::io::Result<CommandOutput> {
            Ok(CommandOutput::default())
        }
    }

    struct EchoTransport;

    #[async_trait::async_trait]
    impl LambdaTransport for EchoTransport {
        async fn invoke(&self, _target: &EnvironmentTarget, body: Vec<u8>) -> Result<LambdaResponse, InvokeError> {
            Ok(LambdaResponse {
                payload: body,
                ..LambdaResponse::default()
            })
        }
    }

    fn invoker() -> RemoteInvoker {
        let session = SessionGuard::new("aws", Arc::new(AlwaysSignedIn));
        RemoteInvoker::new(InvokerConfig::default(), session, Arc::new(EchoTransport))
    }

    #[test]
    fn effects_map_to_commands_and_quit() {
        let payload = InvocationPayload::new(Action::Start, 10);
        let batch = from_effects(vec![
            Effect::Invoke {
                environment: Environment::Development,
                payload: Box::new(payload.clone()),
            },
            Effect::Quit,
        ]);
        assert!(batch.quit);
        assert_eq!(
            batch.commands,
            vec![Cmd::Invoke {
                environment: Environment::Development,
                payload: Box::new(payload),
            }]
        );
    }

    #[tokio::test]
    async fn spawned_invocation_yields_result() {
        let commands = vec![Cmd::Invoke {
            environment: Environment::Production,
            payload: Box::new(InvocationPayload::new(Action::Complete, 3)),
        }];
        let mut handles = run_cmds(&invoker(), commands);
        assert_eq!(handles.len(), 1);

        let result = handles.remove(0).await.expect("task joins");
        assert!(result.is_success());
        assert_eq!(result.output_lines[0], "Environment: prod");
        assert_eq!(result.output_lines[2], "Lambda invocation successful!");
        assert!(result.output_lines[3].contains("\"sweepstake_quest_id\": 3"));
    }

    #[tokio::test]
    async fn panicked_task_becomes_failed_result() {
        let handle: JoinHandle<()> = spawn(async { panic!("boom") });
        let error = handle.await.expect_err("task panics");
        let result = join_failure(error);
        assert!(matches!(result.error, Some(InvokeError::Task(_))));
    }
}
