//! Configuration types for submission validation.
//!
//! This module defines [`IngestConfig`], which controls the size constraints
//! applied to incoming submissions. The type is cheap to clone and easy to
//! deserialize from external configuration formats such as JSON or TOML.
//!
//! # Quick Start
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! // Use defaults for development
//! let config = IngestConfig::default();
//!
//! // Validate before use
//! config.validate().expect("Invalid configuration");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default screenshot cap: 5 MiB of raw image bytes.
pub const DEFAULT_MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Runtime configuration for submission validation.
///
/// # Fields
///
/// - `max_screenshot_bytes`: Upper bound on attached screenshot size
/// - `max_message_bytes`: Optional upper bound on message text size
///
/// # Examples
///
/// ```rust
/// use ingest::IngestConfig;
///
/// let config = IngestConfig {
///     max_screenshot_bytes: 2 * 1024 * 1024,
///     max_message_bytes: Some(64 * 1024),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum screenshot byte length allowed.
    ///
    /// The transport layer enforces a hard body cap before the submission
    /// reaches this crate; this limit is re-checked here so the validator
    /// holds on its own. Submissions exceeding it fail with
    /// [`IngestError::ScreenshotTooLarge`](crate::IngestError::ScreenshotTooLarge).
    ///
    /// Default: [`DEFAULT_MAX_SCREENSHOT_BYTES`]
    pub max_screenshot_bytes: usize,

    /// Maximum message byte length allowed, if set.
    ///
    /// Measured on the trimmed message. `None` means unlimited.
    ///
    /// Default: `None`
    #[serde(default)]
    pub max_message_bytes: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_screenshot_bytes: DEFAULT_MAX_SCREENSHOT_BYTES,
            max_message_bytes: None,
        }
    }
}

impl IngestConfig {
    /// Validates internal consistency of this configuration.
    ///
    /// Inexpensive; intended to run at process start-up so misconfiguration
    /// surfaces before live traffic does.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroScreenshotLimit`] if `max_screenshot_bytes` is 0
    /// - [`ConfigError::ZeroMessageLimit`] if `max_message_bytes` is `Some(0)`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_screenshot_bytes == 0 {
            return Err(ConfigError::ZeroScreenshotLimit);
        }
        if self.max_message_bytes == Some(0) {
            return Err(ConfigError::ZeroMessageLimit);
        }
        Ok(())
    }
}

/// Errors that can occur when validating an [`IngestConfig`].
///
/// These are configuration-time issues, surfaced during service start-up
/// rather than at request time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A zero screenshot limit would reject every screenshot while still
    /// advertising the field; set a positive limit instead.
    #[error("max_screenshot_bytes must be positive")]
    ZeroScreenshotLimit,

    /// A zero message limit would reject every submission.
    #[error("max_message_bytes, when set, must be positive")]
    ZeroMessageLimit,
}
