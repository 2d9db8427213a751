//! Domain records for a single Lambda invocation.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Deployment environment targeted by an invocation.
///
/// Serialized with the short names used in profile mappings and function
/// names (`dev`, `prod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Environment {
    #[serde(rename = "dev")]
    Development,
    #[serde(rename = "prod")]
    Production,
}

impl Environment {
    /// Every environment in menu order.
    pub const ALL: [Environment; 2] = [Environment::Development, Environment::Production];

    /// Short name substituted into function name templates.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "prod",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Production => "Production",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Use development environment",
            Self::Production => "Use production environment",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Operation requested from the rewards calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Start a new sweepstake quest, overriding existing ones.
    Start,
    /// Run the sweepstake calculation without distributing rewards.
    Process,
    /// Run the calculation and distribute rewards.
    Complete,
}

impl Action {
    /// Every action in menu order.
    pub const ALL: [Action; 3] = [Action::Start, Action::Process, Action::Complete];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Process => "process",
            Self::Complete => "complete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Sweepstake",
            Self::Process => "Process Sweepstake",
            Self::Complete => "Complete Sweepstake",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Start => "Play new sweepstake, overriding existing ones",
            Self::Process => "Process sweepstake calculation without distributing rewards",
            Self::Complete => "Complete sweepstake calculation and distribute rewards",
        }
    }

    /// Whether the action targets an existing quest by ID.
    pub fn requires_quest_id(self) -> bool {
        matches!(self, Self::Process | Self::Complete)
    }

    /// Whether the dry run flag has any meaning for this action.
    pub fn supports_dry_run(self) -> bool {
        matches!(self, Self::Process)
    }

    /// Question shown on the parameter prompt.
    pub fn prompt_label(self) -> &'static str {
        if self.requires_quest_id() {
            "Please enter sweepstake quest ID"
        } else {
            "Please enter sweepstake duration in minutes"
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional payload extras configured at startup rather than prompted for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadOptions {
    /// Batch size forwarded with process and complete requests.
    pub batch_size: Option<u64>,
    /// Opaque overrides forwarded with start requests.
    pub overrides: Option<Value>,
}

/// Request body sent to the rewards calculator.
///
/// `sweepstake_quest_id` is present exactly when the action is process or
/// complete, and `duration_minutes` exactly when the action is start. The
/// only way to build a payload is [`InvocationPayload::new`], which upholds
/// that rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvocationPayload {
    action: Action,
    dry_run: bool,
    #[serde(rename = "sweepstake_quest_id", skip_serializing_if = "Option::is_none")]
    quest_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<u64>,
    #[serde(rename = "sweepstake_overrides", skip_serializing_if = "Option::is_none")]
    overrides: Option<Value>,
}

impl InvocationPayload {
    /// Build the payload for `action`, interpreting `value` as the quest ID
    /// or the duration in minutes depending on the action.
    pub fn new(action: Action, value: u64) -> Self {
        let (quest_id, duration_minutes) = if action.requires_quest_id() {
            (Some(value), None)
        } else {
            (None, Some(value))
        };
        Self {
            action,
            dry_run: false,
            quest_id,
            batch_size: None,
            duration_minutes,
            overrides: None,
        }
    }

    /// Set the dry run flag. Ignored for actions other than process.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run && self.action.supports_dry_run();
        self
    }

    /// Apply the startup-configured extras that make sense for this action.
    pub fn with_options(mut self, options: &PayloadOptions) -> Self {
        if self.action.requires_quest_id() {
            self.batch_size = options.batch_size;
        } else {
            self.overrides = options.overrides.clone();
        }
        self
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn quest_id(&self) -> Option<u64> {
        self.quest_id
    }

    pub fn batch_size(&self) -> Option<u64> {
        self.batch_size
    }

    pub fn duration_minutes(&self) -> Option<u64> {
        self.duration_minutes
    }

    pub fn overrides(&self) -> Option<&Value> {
        self.overrides.as_ref()
    }
}

/// Parse prompt input as a strictly positive integer.
pub fn parse_positive(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

/// Failure of an invocation attempt.
///
/// These are hard failures: the invocation either never reached the
/// function or the transport failed. Function-level errors reported by the
/// Lambda itself are part of the output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("AWS CLI not found: '{cli}' is not on PATH")]
    CliNotFound { cli: String },

    #[error("SSO login failed for profile '{profile}': {reason}\nOutput: {output}")]
    SsoLogin {
        profile: String,
        reason: String,
        output: String,
    },

    #[error("failed to run '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("failed to marshal payload: {0}")]
    Serialize(String),

    #[error("failed to invoke Lambda: {0}")]
    Invoke(String),

    #[error("invocation task failed: {0}")]
    Task(String),
}

/// Everything produced by one invocation attempt.
///
/// A new result replaces the previous one; results are never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationResult {
    pub output_lines: Vec<String>,
    pub logs: String,
    pub error: Option<InvokeError>,
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quest_actions_carry_quest_id_only() {
        for action in [Action::Process, Action::Complete] {
            let payload = InvocationPayload::new(action, 42);
            assert_eq!(payload.quest_id(), Some(42));
            assert_eq!(payload.duration_minutes(), None);
        }
    }

    #[test]
    fn start_carries_duration_only() {
        let payload = InvocationPayload::new(Action::Start, 30);
        assert_eq!(payload.duration_minutes(), Some(30));
        assert_eq!(payload.quest_id(), None);
    }

    #[test]
    fn start_payload_serializes_without_absent_fields() {
        let payload = InvocationPayload::new(Action::Start, 30);
        let value = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(value, json!({"action": "start", "dry_run": false, "duration_minutes": 30}));
    }

    #[test]
    fn process_payload_uses_wire_field_names() {
        let options = PayloadOptions {
            batch_size: Some(500),
            overrides: Some(json!({"prize": 10})),
        };
        let payload = InvocationPayload::new(Action::Process, 7).with_dry_run(true).with_options(&options);
        let value = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(
            value,
            json!({"action": "process", "dry_run": true, "sweepstake_quest_id": 7, "batch_size": 500})
        );
    }

    #[test]
    fn options_follow_the_action() {
        let options = PayloadOptions {
            batch_size: Some(100),
            overrides: Some(json!({"winners": 3})),
        };
        let start = InvocationPayload::new(Action::Start, 60).with_options(&options);
        assert_eq!(start.batch_size(), None);
        assert_eq!(start.overrides(), Some(&json!({"winners": 3})));

        let complete = InvocationPayload::new(Action::Complete, 9).with_options(&options);
        assert_eq!(complete.batch_size(), Some(100));
        assert!(complete.overrides().is_none());
    }

    #[test]
    fn dry_run_only_applies_to_process() {
        assert!(InvocationPayload::new(Action::Process, 1).with_dry_run(true).dry_run());
        assert!(!InvocationPayload::new(Action::Complete, 1).with_dry_run(true).dry_run());
        assert!(!InvocationPayload::new(Action::Start, 1).with_dry_run(true).dry_run());
    }

    #[test]
    fn parse_positive_rejects_invalid_input() {
        assert_eq!(parse_positive("30"), Some(30));
        assert_eq!(parse_positive(" 12 "), Some(12));
        for input in ["", "0", "-5", "abc", "1.5", "12a"] {
            assert_eq!(parse_positive(input), None, "input {input:?}");
        }
    }

    #[test]
    fn environment_displays_short_name() {
        assert_eq!(Environment::Development.to_string(), "dev");
        assert_eq!(Environment::Production.to_string(), "prod");
    }

    #[test]
    fn prompt_label_depends_on_action() {
        assert_eq!(Action::Start.prompt_label(), "Please enter sweepstake duration in minutes");
        assert_eq!(Action::Process.prompt_label(), "Please enter sweepstake quest ID");
        assert_eq!(Action::Complete.prompt_label(), "Please enter sweepstake quest ID");
    }
}
