//! SSO session guard backed by the AWS CLI.
//!
//! Validity is probed with `sts get-caller-identity`; only the exit status
//! matters. When the probe fails the guard runs `sso login`, which opens the
//! browser-based login flow and blocks until the CLI exits.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use sweepstake_types::InvokeError;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Captured result of a finished external process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub success: bool,
    /// Human readable exit status (`exit status: 1`, `signal: 9`, ...)
    pub status: String,
    /// stdout followed by stderr
    pub combined: String,
}

/// Seam for spawning the identity CLI.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Whether `program` can be resolved on `PATH`.
    fn is_available(&self, program: &str) -> bool;

    /// Run to completion discarding output; `Ok(true)` on a zero exit status.
    async fn status(&self, program: &str, args: &[&str]) -> std::io::Result<bool>;

    /// Run to completion capturing stdout and stderr.
    async fn output(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
}

/// Production runner using `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    async fn status(&self, program: &str, args: &[&str]) -> std::io::Result<bool> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        Ok(status.success())
    }

    async fn output(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).stdin(Stdio::null()).output().await?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            combined,
        })
    }
}

/// Ensures delegated credentials exist before any remote call.
#[derive(Clone)]
pub struct SessionGuard {
    cli: String,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard").field("cli", &self.cli).finish_non_exhaustive()
    }
}

impl SessionGuard {
    pub fn new(cli: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { cli: cli.into(), runner }
    }

    /// Guard using the real AWS CLI.
    pub fn with_cli(cli: impl Into<String>) -> Self {
        Self::new(cli, Arc::new(TokioCommandRunner))
    }

    /// Make sure `profile` has a valid SSO session, logging in if needed.
    ///
    /// Informational lines for the result screen are appended to `lines` as
    /// they happen, so they survive a failed login. A failed login is
    /// returned as [`InvokeError::SsoLogin`] with the CLI's combined output.
    pub async fn ensure_session(&self, profile: &str, lines: &mut Vec<String>) -> Result<(), InvokeError> {
        if !self.runner.is_available(&self.cli) {
            return Err(InvokeError::CliNotFound { cli: self.cli.clone() });
        }

        let identity_args = ["sts", "get-caller-identity", "--profile", profile];
        let valid = self
            .runner
            .status(&self.cli, &identity_args)
            .await
            .map_err(|error| self.spawn_error(&identity_args, error))?;
        if valid {
            debug!(profile, "SSO session is valid");
            return Ok(());
        }

        warn!(profile, "SSO session expired; starting login");
        lines.push("SSO session expired. Logging in...".to_string());

        let login_args = ["sso", "login", "--profile", profile];
        let login = self
            .runner
            .output(&self.cli, &login_args)
            .await
            .map_err(|error| self.spawn_error(&login_args, error))?;
        if !login.success {
            warn!(profile, status = %login.status, "SSO login failed");
            return Err(InvokeError::SsoLogin {
                profile: profile.to_string(),
                reason: login.status,
                output: login.combined,
            });
        }

        info!(profile, "SSO login successful");
        lines.push("SSO login successful".to_string());
        Ok(())
    }

    fn spawn_error(&self, args: &[&str], error: std::io::Error) -> InvokeError {
        InvokeError::Spawn {
            command: format!("{} {}", self.cli, args.join(" ")),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted runner recording every invocation.
    #[derive(Default)]
    pub(crate) struct FakeRunner {
        pub missing: bool,
        pub session_valid: bool,
        pub login: Option<CommandOutput>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeRunner {
        pub(crate) fn valid_session() -> Self {
            Self {
                session_valid: true,
                ..Self::default()
            }
        }

        pub(crate) fn expired_session(login: CommandOutput) -> Self {
            Self {
                login: Some(login),
                ..Self::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        fn is_available(&self, _program: &str) -> bool {
            !self.missing
        }

        async fn status(&self, program: &str, args: &[&str]) -> std::io::Result<bool> {
            self.calls.lock().unwrap().push(format!("{program} {}", args.join(" ")));
            Ok(self.session_valid)
        }

        async fn output(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
            self.calls.lock().unwrap().push(format!("{program} {}", args.join(" ")));
            self.login
                .clone()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no login scripted"))
        }
    }

    fn guard(runner: &Arc<FakeRunner>) -> SessionGuard {
        SessionGuard::new("aws", runner.clone())
    }

    #[tokio::test]
    async fn valid_session_never_logs_in() {
        let runner = Arc::new(FakeRunner::valid_session());
        let mut lines = Vec::new();
        guard(&runner).ensure_session("nonprod", &mut lines).await.unwrap();
        assert!(lines.is_empty());
        assert_eq!(runner.calls(), vec!["aws sts get-caller-identity --profile nonprod"]);
    }

    #[tokio::test]
    async fn expired_session_recovers_through_login() {
        let runner = Arc::new(FakeRunner::expired_session(CommandOutput {
            success: true,
            status: "exit status: 0".into(),
            combined: "Successfully logged into Start URL".into(),
        }));
        let mut lines = Vec::new();
        guard(&runner).ensure_session("nonprod", &mut lines).await.unwrap();
        assert_eq!(lines, vec!["SSO session expired. Logging in...", "SSO login successful"]);
        assert_eq!(
            runner.calls(),
            vec![
                "aws sts get-caller-identity --profile nonprod",
                "aws sso login --profile nonprod"
            ]
        );
    }

    #[tokio::test]
    async fn failed_login_carries_cli_output() {
        let runner = Arc::new(FakeRunner::expired_session(CommandOutput {
            success: false,
            status: "exit status: 255".into(),
            combined: "Error when retrieving token from sso: Token has expired".into(),
        }));
        let mut lines = Vec::new();
        let error = guard(&runner).ensure_session("prod", &mut lines).await.unwrap_err();
        assert_eq!(lines, vec!["SSO session expired. Logging in..."]);
        match &error {
            InvokeError::SsoLogin { profile, output, .. } => {
                assert_eq!(profile, "prod");
                assert!(output.contains("Token has expired"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.to_string().contains("Token has expired"));
    }

    #[tokio::test]
    async fn missing_cli_is_reported_before_spawning() {
        let runner = Arc::new(FakeRunner {
            missing: true,
            ..FakeRunner::default()
        });
        let error = guard(&runner).ensure_session("prod", &mut Vec::new()).await.unwrap_err();
        assert_eq!(error, InvokeError::CliNotFound { cli: "aws".into() });
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn spawn_failure_names_the_command() {
        let runner = Arc::new(FakeRunner::default());
        let error = guard(&runner).ensure_session("prod", &mut Vec::new()).await.unwrap_err();
        assert_eq!(
            error,
            InvokeError::Spawn {
                command: "aws sso login --profile prod".into(),
                reason: "no login scripted".into(),
            }
        );
    }
}
