//! Runtime settings for the remote agent platform.
//!
//! `RuntimeSettings` is the full configuration surface: runtime endpoint
//! identity, memory store id, model and guardrail identifiers, and the tool
//! credentials the hosted agent is wired with. Values come from a
//! `config.toml` in the data directory overridden by environment variables;
//! loading lives in `confab-infra`.
//!
//! Secrets are wrapped in [`secrecy::SecretString`] so they never appear in
//! `Debug` output or serialized snapshots.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Runtime endpoint version selector sent with every invocation.
pub const DEFAULT_QUALIFIER: &str = "DEFAULT";

/// Settings the diagnostics view checks individually, by variable name.
pub const REQUIRED_SETTINGS: &[&str] = &[
    "AGENT_RUNTIME_ARN",
    "AGENTCORE_API_KEY",
    "MEMORY_ID",
    "BEDROCK_MODEL_ID",
    "KNOWLEDGE_BASE_ID",
    "TAVILY_API_KEY",
    "REGION",
    "GUARDRAIL_ID",
];

/// Full configuration surface for the remote agent platform.
///
/// All fields are optional at load time; operations that need a value
/// resolve it through the `require_*` accessors, which report the missing
/// setting individually by name.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuntimeSettings {
    /// ARN of the hosted agent runtime to invoke.
    #[serde(default)]
    pub agent_runtime_arn: Option<String>,

    /// Bearer token for the data-plane API.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Memory store identifier holding recorded sessions.
    #[serde(default)]
    pub memory_id: Option<String>,

    /// Model identifier the hosted agent is configured with.
    #[serde(default)]
    pub model_id: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// Knowledge base the hosted agent searches.
    #[serde(default)]
    pub knowledge_base_id: Option<String>,

    /// Web-search API key the hosted agent's search tool uses.
    #[serde(default)]
    pub tavily_api_key: Option<SecretString>,

    #[serde(default)]
    pub guardrail_id: Option<String>,

    #[serde(default)]
    pub guardrail_version: Option<String>,

    #[serde(default)]
    pub guardrail_trace: Option<String>,

    /// Runtime endpoint version selector.
    #[serde(default)]
    pub qualifier: Option<String>,
}

impl RuntimeSettings {
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn qualifier(&self) -> &str {
        self.qualifier.as_deref().unwrap_or(DEFAULT_QUALIFIER)
    }

    pub fn guardrail_version(&self) -> &str {
        self.guardrail_version.as_deref().unwrap_or("1")
    }

    pub fn guardrail_trace(&self) -> &str {
        self.guardrail_trace.as_deref().unwrap_or("enabled")
    }

    pub fn require_runtime_arn(&self) -> Result<&str, ConfigError> {
        self.agent_runtime_arn
            .as_deref()
            .ok_or(ConfigError::Missing("AGENT_RUNTIME_ARN"))
    }

    pub fn require_memory_id(&self) -> Result<&str, ConfigError> {
        self.memory_id
            .as_deref()
            .ok_or(ConfigError::Missing("MEMORY_ID"))
    }

    pub fn require_model_id(&self) -> Result<&str, ConfigError> {
        self.model_id
            .as_deref()
            .ok_or(ConfigError::Missing("BEDROCK_MODEL_ID"))
    }

    /// Whether the setting known by `name` has a value.
    ///
    /// Names match the environment variables the loader reads.
    pub fn is_set(&self, name: &str) -> bool {
        match name {
            "AGENT_RUNTIME_ARN" => self.agent_runtime_arn.is_some(),
            "AGENTCORE_API_KEY" => self.api_key.is_some(),
            "MEMORY_ID" => self.memory_id.is_some(),
            "BEDROCK_MODEL_ID" => self.model_id.is_some(),
            "KNOWLEDGE_BASE_ID" => self.knowledge_base_id.is_some(),
            "TAVILY_API_KEY" => self.tavily_api_key.is_some(),
            "REGION" => self.region.is_some(),
            "GUARDRAIL_ID" => self.guardrail_id.is_some(),
            "GUARDRAIL_VERSION" => self.guardrail_version.is_some(),
            "GUARDRAIL_TRACE" => self.guardrail_trace.is_some(),
            _ => false,
        }
    }

    /// Per-setting status for the diagnostics view, one row per variable.
    pub fn check(&self) -> Vec<SettingStatus> {
        REQUIRED_SETTINGS
            .iter()
            .map(|name| SettingStatus {
                name: name.to_string(),
                set: self.is_set(name),
            })
            .collect()
    }

    /// Display snapshot with secrets redacted.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "agent_runtime_arn": self.agent_runtime_arn,
            "api_key": self.api_key.as_ref().map(|_| "***"),
            "memory_id": self.memory_id,
            "model_id": self.model_id,
            "region": self.region(),
            "knowledge_base_id": self.knowledge_base_id,
            "tavily_api_key": self.tavily_api_key.as_ref().map(|_| "***"),
            "guardrail_id": self.guardrail_id,
            "guardrail_version": self.guardrail_version(),
            "guardrail_trace": self.guardrail_trace(),
            "qualifier": self.qualifier(),
        })
    }

    /// Expose the bearer token for request construction.
    pub fn api_key_value(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }
}

/// Set/unset status of one named setting.
#[derive(Debug, Clone, Serialize)]
pub struct SettingStatus {
    pub name: String,
    pub set: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> RuntimeSettings {
        RuntimeSettings {
            agent_runtime_arn: Some("arn:aws:bedrock-agentcore:us-east-1:123:runtime/demo".into()),
            api_key: Some(SecretString::from("token-123")),
            memory_id: Some("mem-1".into()),
            model_id: Some("anthropic.claude-sonnet-4-20250514-v1:0".into()),
            region: Some("eu-west-1".into()),
            knowledge_base_id: Some("kb-1".into()),
            tavily_api_key: Some(SecretString::from("tvly-123")),
            guardrail_id: Some("gr-1".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = RuntimeSettings::default();
        assert_eq!(settings.region(), "us-east-1");
        assert_eq!(settings.qualifier(), "DEFAULT");
        assert_eq!(settings.guardrail_version(), "1");
        assert_eq!(settings.guardrail_trace(), "enabled");
    }

    #[test]
    fn test_require_reports_variable_name() {
        let settings = RuntimeSettings::default();
        let err = settings.require_memory_id().unwrap_err();
        assert_eq!(err.to_string(), "MEMORY_ID is not set");
        let err = settings.require_runtime_arn().unwrap_err();
        assert_eq!(err.to_string(), "AGENT_RUNTIME_ARN is not set");
    }

    #[test]
    fn test_check_reports_each_setting_individually() {
        let statuses = RuntimeSettings::default().check();
        assert_eq!(statuses.len(), REQUIRED_SETTINGS.len());
        assert!(statuses.iter().all(|s| !s.set));

        let statuses = populated().check();
        assert!(statuses.iter().all(|s| s.set));
    }

    #[test]
    fn test_snapshot_redacts_secrets() {
        let snapshot = populated().snapshot();
        assert_eq!(snapshot["api_key"], "***");
        assert_eq!(snapshot["tavily_api_key"], "***");
        assert_eq!(snapshot["memory_id"], "mem-1");
        assert_eq!(snapshot["region"], "eu-west-1");
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let rendered = format!("{:?}", populated());
        assert!(!rendered.contains("token-123"));
        assert!(!rendered.contains("tvly-123"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let settings: RuntimeSettings = toml::from_str(
            r#"
memory_id = "mem-7"
region = "us-west-2"
api_key = "secret-token"
"#,
        )
        .unwrap();
        assert_eq!(settings.memory_id.as_deref(), Some("mem-7"));
        assert_eq!(settings.region(), "us-west-2");
        assert_eq!(settings.api_key_value(), Some("secret-token"));
        assert!(settings.model_id.is_none());
    }
}
