//! AWS side of the sweepstake rewards tool.
//!
//! - [`SessionGuard`] makes sure an SSO session exists for a profile,
//!   running `aws sso login` when the cached credentials have expired.
//! - [`RemoteInvoker`] resolves the profile and function for an
//!   environment, guards the session, invokes the Lambda and shapes the
//!   response into an [`InvocationResult`](sweepstake_types::InvocationResult).
//!
//! Both talk to the outside world through small traits ([`CommandRunner`],
//! [`LambdaTransport`]) so tests can substitute fakes.

pub mod config;
pub mod invoker;
pub mod session;
pub mod transport;

pub use config::{ConfigError, EnvironmentTarget, InvokerConfig};
pub use invoker::RemoteInvoker;
pub use session::{CommandOutput, CommandRunner, SessionGuard, TokioCommandRunner};
pub use transport::{AwsLambdaTransport, LambdaResponse, LambdaTransport};
