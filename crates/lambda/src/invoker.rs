//! Remote invoker: session guard, Lambda call and response shaping.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};
use sweepstake_types::{Environment, InvocationPayload, InvocationResult, InvokeError};
use tracing::{info, warn};

use crate::config::InvokerConfig;
use crate::session::SessionGuard;
use crate::transport::{AwsLambdaTransport, LambdaResponse, LambdaTransport};

/// Invokes the rewards calculator for a chosen environment.
///
/// Cheap to clone; the runtime moves a clone into each background task.
#[derive(Clone)]
pub struct RemoteInvoker {
    config: Arc<InvokerConfig>,
    session: SessionGuard,
    transport: Arc<dyn LambdaTransport>,
}

impl std::fmt::Debug for RemoteInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteInvoker")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl RemoteInvoker {
    pub fn new(config: InvokerConfig, session: SessionGuard, transport: Arc<dyn LambdaTransport>) -> Self {
        Self {
            config: Arc::new(config),
            session,
            transport,
        }
    }

    /// Invoker wired to the AWS CLI and SDK.
    pub fn from_config(config: InvokerConfig) -> Self {
        let session = SessionGuard::with_cli(config.aws_cli.clone());
        let transport = Arc::new(AwsLambdaTransport::new(config.region.clone()));
        Self::new(config, session, transport)
    }

    /// Run one invocation. Never panics and never retries; every failure is
    /// captured in the returned result.
    pub async fn invoke(&self, environment: Environment, payload: &InvocationPayload) -> InvocationResult {
        let mut result = InvocationResult::default();
        if let Err(error) = self.invoke_into(environment, payload, &mut result).await {
            warn!(%environment, action = %payload.action(), %error, "invocation failed");
            result.error = Some(error);
        }
        result
    }

    async fn invoke_into(
        &self,
        environment: Environment,
        payload: &InvocationPayload,
        result: &mut InvocationResult,
    ) -> Result<(), InvokeError> {
        let target = self.config.target(environment);
        let output = &mut result.output_lines;

        output.push(format!("Environment: {environment}"));
        let pretty = serde_json::to_string_pretty(payload).map_err(|error| InvokeError::Serialize(error.to_string()))?;
        output.push(format!("Payload: {pretty}"));

        self.session.ensure_session(&target.profile, output).await?;

        let body = serde_json::to_vec(payload).map_err(|error| InvokeError::Serialize(error.to_string()))?;
        info!(%environment, function = %target.function_name, action = %payload.action(), "invoking rewards calculator");
        let response = self.transport.invoke(&target, body).await?;

        output.push("Lambda invocation successful!".to_string());
        apply_response(response, result);
        Ok(())
    }
}

/// Fold a successful response into the result. Parse and decode problems
/// are reported as output lines, never as errors.
fn apply_response(response: LambdaResponse, result: &mut InvocationResult) {
    result.output_lines.push(describe_payload(&response.payload));

    if let Some(function_error) = response.function_error {
        result.output_lines.push(format!("Function error: {function_error}"));
    }

    if let Some(encoded) = response.log_result {
        match decode_logs(&encoded) {
            Ok(logs) => result.logs = logs,
            Err(error) => result.output_lines.push(format!("Error decoding logs: {error}")),
        }
    }
}

/// Pretty-print a JSON object response, falling back to the raw bytes.
fn describe_payload(bytes: &[u8]) -> String {
    match serde_json::from_slice::<Map<String, Value>>(bytes) {
        Ok(object) => {
            let formatted = serde_json::to_string_pretty(&object).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());
            format!("Response: {formatted}")
        }
        Err(_) => format!("Raw response: {}", String::from_utf8_lossy(bytes)),
    }
}

fn decode_logs(encoded: &str) -> Result<String, base64::DecodeError> {
    let decoded = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8_lossy(&decoded).into_owned())
}
