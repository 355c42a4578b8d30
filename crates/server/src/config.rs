use classify::ClassifyConfig;
use feedbackd::RateLimitConfig;
use ingest::IngestConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB. The multipart form carries the
    /// screenshot, so this sits just above the screenshot cap.
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS. The widget posts cross-origin, so this defaults on.
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-identity rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Submission validation limits
    #[serde(default)]
    pub ingest: IngestConfig,

    /// AI classification backend
    #[serde(default)]
    pub classify: ClassifyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            rate_limit: RateLimitConfig::default(),
            ingest: IngestConfig::default(),
            classify: ClassifyConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("feedbackd").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("FEEDBACKD").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;

        // The bare GEMINI_API_KEY env var is how most deployments pass the
        // credential; honor it when the config didn't set one.
        if !config.classify.is_enabled() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                if !key.trim().is_empty() {
                    config.classify.api_key = Some(key);
                }
            }
        }
        if !config.classify.is_enabled() {
            tracing::warn!("no AI api key configured; feedback will persist unclassified");
        }

        config.ingest.validate()?;

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_body_size_mb() -> usize {
    6
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
