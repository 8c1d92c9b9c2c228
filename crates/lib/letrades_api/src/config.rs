//! Relay server configuration.

use std::time::Duration;

use letrades_core::completion::anthropic::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use letrades_core::prompt::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, PromptSettings};
use letrades_core::relay::RelaySettings;

/// Default listen address of the relay.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Configuration for the relay server. Built once at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3001").
    pub bind_addr: String,
    /// Anthropic API key. Requests fail with a configuration error when absent.
    pub anthropic_api_key: Option<String>,
    /// Base URL of the completion API.
    pub anthropic_base_url: String,
    /// Model identifier sent with every completion.
    pub model: String,
    /// Output-token budget sent with every completion.
    pub max_tokens: u32,
    /// Timeout for the outbound completion call.
    pub upstream_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            anthropic_api_key: None,
            anthropic_base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            upstream_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                                       | Default                     |
    /// |------------------------------------------------|-----------------------------|
    /// | `BIND_ADDR`                                    | `127.0.0.1:3001`            |
    /// | `ANTHROPIC_API_KEY` / `VITE_ANTHROPIC_API_KEY` | unset                       |
    /// | `ANTHROPIC_BASE_URL`                           | `https://api.anthropic.com` |
    ///
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            anthropic_api_key: var("ANTHROPIC_API_KEY").or_else(|| var("VITE_ANTHROPIC_API_KEY")),
            anthropic_base_url: var("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            ..Self::default()
        }
    }

    /// Per-request settings handed to the relay.
    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            api_key: self.anthropic_api_key.clone(),
            prompt: PromptSettings {
                model: self.model.clone(),
                max_tokens: self.max_tokens,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ApiConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.anthropic_base_url, DEFAULT_BASE_URL);
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn vite_key_is_a_fallback() {
        let config = config_from(&[("VITE_ANTHROPIC_API_KEY", "sk-vite")]);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-vite"));

        let config = config_from(&[
            ("ANTHROPIC_API_KEY", "sk-main"),
            ("VITE_ANTHROPIC_API_KEY", "sk-vite"),
        ]);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-main"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[
            ("ANTHROPIC_API_KEY", ""),
            ("VITE_ANTHROPIC_API_KEY", "sk-vite"),
            ("BIND_ADDR", ""),
        ]);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-vite"));
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);

        let config = config_from(&[("ANTHROPIC_API_KEY", "")]);
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn reads_bind_addr_and_base_url() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("ANTHROPIC_BASE_URL", "http://127.0.0.1:9000"),
        ]);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.anthropic_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn defaults_match_fixed_relay_values() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3001");
        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.max_tokens, 1000);
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn relay_settings_carry_credential_and_budget() {
        let config = ApiConfig {
            anthropic_api_key: Some("sk-test".into()),
            max_tokens: 200,
            ..ApiConfig::default()
        };
        let settings = config.relay_settings();
        assert_eq!(settings.api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.prompt.max_tokens, 200);
    }
}
