//! Configuration for the classification client.
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration for [`GeminiClassifier`](crate::GeminiClassifier).
///
/// Classification is an enhancement, never a hard dependency: with no API
/// key configured the pipeline simply skips the call. All timeouts are
/// bounded so an unresponsive model backend cannot hold a request open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    /// API credential. `None` (or empty) disables classification entirely.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier appended to the endpoint path.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative-AI endpoint. Overridable for testing.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Cap on generated tokens; the reply is one small JSON object.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature. Low, since we want stable structured output.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ClassifyConfig {
    /// True when an API key is present and non-empty.
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Whole-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a [`Duration`].
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_output_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_key() {
        let cfg = ClassifyConfig::default();
        assert!(!cfg.is_enabled());

        let cfg = ClassifyConfig {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(!cfg.is_enabled());
    }

    #[test]
    fn enabled_with_key() {
        let cfg = ClassifyConfig {
            api_key: Some("k".into()),
            ..Default::default()
        };
        assert!(cfg.is_enabled());
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
    }
}
