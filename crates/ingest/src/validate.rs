//! Submission validation and bot filtering.
//!
//! This module contains the two defensive checks that sit in front of the
//! pipeline: the honeypot trap-field inspection and the ordered field
//! validation that turns a [`RawSubmission`] into a [`ValidSubmission`].
//!
//! # Validation Flow
//!
//! ```text
//! RawSubmission
//!        │
//!        ▼
//! ┌─────────────────────────────┐
//! │ 1. Message present?         │  → MissingMessage
//! │    (trimmed, non-empty)     │
//! ├─────────────────────────────┤
//! │ 2. Message within limit?    │  → MessageTooLong
//! ├─────────────────────────────┤
//! │ 3. Screenshot within limit? │  → ScreenshotTooLarge
//! └─────────────────────────────┘
//!        │
//!        ▼
//! ValidSubmission
//! ```
//!
//! The honeypot check is deliberately not part of [`validate`]: a bot-like
//! submission must not produce a client-visible error. The orchestrator
//! checks [`is_likely_bot`] first and short-circuits to a synthetic success.
use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::types::{RawSubmission, ValidSubmission};

/// Returns true if the honeypot trap field marks this submission as
/// likely automated.
///
/// The `website` field is rendered invisibly by the widget; humans never
/// fill it, naive form-filling bots do. Pure function: true iff the trimmed
/// value is non-empty.
///
/// # Examples
///
/// ```rust
/// use ingest::is_likely_bot;
///
/// assert!(!is_likely_bot(""));
/// assert!(!is_likely_bot("   "));
/// assert!(is_likely_bot("https://spam.example"));
/// ```
pub fn is_likely_bot(website: &str) -> bool {
    !website.trim().is_empty()
}

/// Validates a raw submission against the configured constraints.
///
/// Rules are applied in order; the first failure wins:
///
/// 1. `message` must be non-empty after trimming ([`IngestError::MissingMessage`])
/// 2. the trimmed message must fit `cfg.max_message_bytes`, when set
///    ([`IngestError::MessageTooLong`])
/// 3. `screenshot`, when present, must fit `cfg.max_screenshot_bytes`
///    ([`IngestError::ScreenshotTooLarge`])
///
/// No other fields are mandatory. The honeypot field is dropped here; it has
/// already been inspected by the time validation runs.
///
/// # Examples
///
/// ```rust
/// use ingest::{validate, IngestConfig, IngestError, RawSubmission};
///
/// let cfg = IngestConfig::default();
///
/// let ok = validate(RawSubmission::text("  works for me  "), &cfg).unwrap();
/// assert_eq!(ok.message, "works for me");
///
/// let err = validate(RawSubmission::text("   "), &cfg).unwrap_err();
/// assert_eq!(err, IngestError::MissingMessage);
/// ```
pub fn validate(raw: RawSubmission, cfg: &IngestConfig) -> Result<ValidSubmission, IngestError> {
    let message = raw.message.trim();
    if message.is_empty() {
        return Err(IngestError::MissingMessage);
    }

    if let Some(limit) = cfg.max_message_bytes {
        if message.len() > limit {
            return Err(IngestError::MessageTooLong {
                actual: message.len(),
                limit,
            });
        }
    }

    if let Some(ref shot) = raw.screenshot {
        if shot.len() > cfg.max_screenshot_bytes {
            return Err(IngestError::ScreenshotTooLarge {
                actual: shot.len(),
                limit: cfg.max_screenshot_bytes,
            });
        }
    }

    Ok(ValidSubmission {
        message: message.to_string(),
        screenshot: raw.screenshot,
        project: raw.project,
    })
}
