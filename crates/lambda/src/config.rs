//! Environment-to-target mapping for the invoker.

use sweepstake_types::Environment;
use thiserror::Error;

/// Placeholder replaced by the environment short name in function templates.
pub const ENV_PLACEHOLDER: &str = "{env}";

pub const DEFAULT_DEV_PROFILE: &str = "platform-nonprod-engineer";
pub const DEFAULT_PROD_PROFILE: &str = "platform-prod-engineer";
pub const DEFAULT_FUNCTION_TEMPLATE: &str = "imx-rewards-{env}-sweepstake-rewards-calculator";
pub const DEFAULT_AWS_CLI: &str = "aws";

/// Error surfaced when the invoker configuration is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("function template '{template}' must contain {{env}}")]
    MissingPlaceholder { template: String },
    #[error("no SSO profile configured for the {environment} environment")]
    EmptyProfile { environment: Environment },
    #[error("AWS CLI program name must not be empty")]
    EmptyCli,
}

/// Profile and function name resolved for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentTarget {
    pub profile: String,
    pub function_name: String,
}

/// Explicit configuration handed to the invoker at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    pub dev_profile: String,
    pub prod_profile: String,
    pub function_template: String,
    /// Program used for `sts get-caller-identity` and `sso login`.
    pub aws_cli: String,
    /// Region override; the profile's region is used when unset.
    pub region: Option<String>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            dev_profile: DEFAULT_DEV_PROFILE.to_string(),
            prod_profile: DEFAULT_PROD_PROFILE.to_string(),
            function_template: DEFAULT_FUNCTION_TEMPLATE.to_string(),
            aws_cli: DEFAULT_AWS_CLI.to_string(),
            region: None,
        }
    }
}

impl InvokerConfig {
    /// Check the configuration before the TUI starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.function_template.contains(ENV_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder {
                template: self.function_template.clone(),
            });
        }
        for environment in Environment::ALL {
            if self.profile(environment).trim().is_empty() {
                return Err(ConfigError::EmptyProfile { environment });
            }
        }
        if self.aws_cli.trim().is_empty() {
            return Err(ConfigError::EmptyCli);
        }
        Ok(())
    }

    pub fn profile(&self, environment: Environment) -> &str {
        match environment {
            Environment::Development => &self.dev_profile,
            Environment::Production => &self.prod_profile,
        }
    }

    pub fn function_name(&self, environment: Environment) -> String {
        self.function_template.replace(ENV_PLACEHOLDER, environment.short_name())
    }

    pub fn target(&self, environment: Environment) -> EnvironmentTarget {
        EnvironmentTarget {
            profile: self.profile(environment).to_string(),
            function_name: self.function_name(environment),
        }
    }
}
