//! Lambda transport: one synchronous `Invoke` per call, no retries.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{InvocationType, LogType};
use sweepstake_types::InvokeError;
use tracing::debug;

use crate::config::EnvironmentTarget;

/// Raw pieces of a successful `Invoke` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LambdaResponse {
    pub payload: Vec<u8>,
    /// Set when the function itself failed (`Unhandled`, `Handled`)
    pub function_error: Option<String>,
    /// Base64 encoded tail of the execution log
    pub log_result: Option<String>,
}

#[async_trait]
pub trait LambdaTransport: Send + Sync {
    /// Invoke `target.function_name` with credentials from `target.profile`.
    async fn invoke(&self, target: &EnvironmentTarget, body: Vec<u8>) -> Result<LambdaResponse, InvokeError>;
}

/// Transport backed by the AWS SDK.
///
/// Credentials and region come from the shared config of the target
/// profile, which picks up the SSO token cached by `aws sso login`.
#[derive(Debug, Clone, Default)]
pub struct AwsLambdaTransport {
    region: Option<String>,
}

impl AwsLambdaTransport {
    pub fn new(region: Option<String>) -> Self {
        Self { region }
    }
}

#[async_trait]
impl LambdaTransport for AwsLambdaTransport {
    async fn invoke(&self, target: &EnvironmentTarget, body: Vec<u8>) -> Result<LambdaResponse, InvokeError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(&target.profile);
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;
        let client = aws_sdk_lambda::Client::new(&sdk_config);

        debug!(function = %target.function_name, profile = %target.profile, "invoking lambda");
        let output = client
            .invoke()
            .function_name(&target.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .log_type(LogType::Tail)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|error| InvokeError::Invoke(DisplayErrorContext(&error).to_string()))?;

        Ok(LambdaResponse {
            payload: output.payload().map(|blob| blob.as_ref().to_vec()).unwrap_or_default(),
            function_error: output.function_error().map(str::to_owned),
            log_result: output.log_result().map(str::to_owned),
        })
    }
}
