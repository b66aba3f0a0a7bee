//! Settings loader for Confab.
//!
//! Reads `config.toml` from the data directory (`~/.confab/` in
//! production), falling back to defaults when the file is missing or
//! malformed, then applies environment variable overrides. Environment
//! variables always win, so a deployment can run with no config file at
//! all -- the original console was configured entirely from the
//! environment.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use confab_types::config::RuntimeSettings;

/// Resolve the data directory.
///
/// Priority: `CONFAB_DATA_DIR` env var, then `~/.confab`, then `./.confab`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CONFAB_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".confab");
    }

    PathBuf::from(".confab")
}

/// Load settings from `{data_dir}/config.toml` plus environment overrides.
///
/// - Missing file: defaults.
/// - Malformed file: warn and use defaults.
/// - Environment variables override file values individually.
pub async fn load_settings(data_dir: &Path) -> RuntimeSettings {
    let config_path = data_dir.join("config.toml");

    let mut settings = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<RuntimeSettings>(&content) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                RuntimeSettings::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            RuntimeSettings::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            RuntimeSettings::default()
        }
    };

    apply_env_overrides(&mut settings);
    settings
}

/// Overlay environment variables onto `settings`.
///
/// Empty values count as unset, matching how the original treated blank
/// environment entries.
pub fn apply_env_overrides(settings: &mut RuntimeSettings) {
    if let Some(v) = env_value("AGENT_RUNTIME_ARN") {
        settings.agent_runtime_arn = Some(v);
    }
    if let Some(v) = env_value("AGENTCORE_API_KEY") {
        settings.api_key = Some(SecretString::from(v));
    }
    if let Some(v) = env_value("MEMORY_ID") {
        settings.memory_id = Some(v);
    }
    if let Some(v) = env_value("BEDROCK_MODEL_ID") {
        settings.model_id = Some(v);
    }
    if let Some(v) = env_value("REGION") {
        settings.region = Some(v);
    }
    if let Some(v) = env_value("KNOWLEDGE_BASE_ID") {
        settings.knowledge_base_id = Some(v);
    }
    if let Some(v) = env_value("TAVILY_API_KEY") {
        settings.tavily_api_key = Some(SecretString::from(v));
    }
    if let Some(v) = env_value("GUARDRAIL_ID") {
        settings.guardrail_id = Some(v);
    }
    if let Some(v) = env_value("GUARDRAIL_VERSION") {
        settings.guardrail_version = Some(v);
    }
    if let Some(v) = env_value("GUARDRAIL_TRACE") {
        settings.guardrail_trace = Some(v);
    }
}

fn env_value(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
