//! Runtime settings
//!
//! All configuration is resolved once at process start from `NEWSROOM_*`
//! environment variables and treated as immutable for the run.

use crate::llm::Provider;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_PROVIDER: &str = "NEWSROOM_PROVIDER";
pub const ENV_API_KEY: &str = "NEWSROOM_API_KEY";
pub const ENV_MODEL: &str = "NEWSROOM_MODEL";
pub const ENV_BASE_URL: &str = "NEWSROOM_BASE_URL";
pub const ENV_MAX_TOKENS: &str = "NEWSROOM_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "NEWSROOM_TEMPERATURE";
pub const ENV_OUTPUT_DIR: &str = "NEWSROOM_OUTPUT_DIR";

const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration failures are fatal before any stage executes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set; the generation backend requires an API key")]
    MissingApiKey(&'static str),

    #[error("unsupported LLM provider {name:?} (supported: anthropic)")]
    UnsupportedProvider { name: String },

    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable per-run configuration surface.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    /// Alternate API endpoint; `None` uses the provider default.
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub output_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary lookup. Lets tests run
    /// without mutating process-global environment state.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider_name = get(ENV_PROVIDER).unwrap_or_else(|| "anthropic".to_string());
        // Unsupported providers fail here, at selection time, never at
        // first use.
        let provider: Provider =
            provider_name
                .parse()
                .map_err(|_| ConfigError::UnsupportedProvider {
                    name: provider_name.clone(),
                })?;

        let api_key = get(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(ENV_API_KEY))?;

        let model = get(ENV_MODEL)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = get(ENV_BASE_URL).filter(|url| !url.trim().is_empty());

        let max_tokens = match get(ENV_MAX_TOKENS) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                var: ENV_MAX_TOKENS,
                value: raw.clone(),
                reason: format!("{e}"),
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        let temperature = match get(ENV_TEMPERATURE) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                var: ENV_TEMPERATURE,
                value: raw.clone(),
                reason: format!("{e}"),
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let output_dir = PathBuf::from(
            get(ENV_OUTPUT_DIR).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
        );

        Ok(Settings {
            provider,
            api_key,
            model,
            base_url,
            max_tokens,
            temperature,
            output_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let settings = Settings::from_lookup(lookup(&[(ENV_API_KEY, "sk-test")])).unwrap();
        assert_eq!(settings.provider, Provider::Anthropic);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert!(settings.base_url.is_none());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Settings::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey(ENV_API_KEY));
        // Whitespace-only keys are rejected too
        let err = Settings::from_lookup(lookup(&[(ENV_API_KEY, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey(ENV_API_KEY));
    }

    #[test]
    fn test_unsupported_provider_fails_at_selection_time() {
        let err = Settings::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_PROVIDER, "openai_compat"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedProvider {
                name: "openai_compat".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_numeric_values() {
        let err = Settings::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_MAX_TOKENS, "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: ENV_MAX_TOKENS,
                ..
            }
        ));
    }

    #[test]
    fn test_explicit_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_PROVIDER, "Anthropic"),
            (ENV_MODEL, "claude-test"),
            (ENV_BASE_URL, "https://proxy.example.com"),
            (ENV_MAX_TOKENS, "2048"),
            (ENV_TEMPERATURE, "0.2"),
            (ENV_OUTPUT_DIR, "/tmp/runs"),
        ]))
        .unwrap();
        assert_eq!(settings.model, "claude-test");
        assert_eq!(settings.base_url.as_deref(), Some("https://proxy.example.com"));
        assert_eq!(settings.max_tokens, 2048);
        assert!((settings.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(settings.output_dir, PathBuf::from("/tmp/runs"));
    }
}
