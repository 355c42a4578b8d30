//! Core data model types for the ingest crate.
//!
//! These types represent the shape of a feedback submission as it arrives
//! from the transport layer and the validated form that flows to downstream
//! pipeline stages. They are designed to be:
//!
//! - **Serializable**: Support for JSON via serde
//! - **Cloneable**: Cheap to clone for pipeline processing
//! - **Comparable**: Support equality checks for testing
//!
//! # Type Flow
//!
//! ```text
//! RawSubmission                     SubmissionMeta
//! ├── message: String               ├── origin_url: String
//! ├── screenshot: Option<Vec<u8>>   ├── client_identity: String
//! ├── website: String (honeypot)    └── user_agent: Option<String>
//! └── project: Option<String>
//!
//!         ↓ validate()
//!
//! ValidSubmission
//! ├── message: String (trimmed, non-empty)
//! ├── screenshot: Option<Vec<u8>> (size-checked)
//! └── project: Option<String>
//! ```
//!
//! # Examples
//!
//! ```rust
//! use ingest::{RawSubmission, SubmissionMeta};
//!
//! let raw = RawSubmission {
//!     message: "The export button does nothing".to_string(),
//!     screenshot: None,
//!     website: String::new(), // honeypot left empty by humans
//!     project: Some("dashboard".to_string()),
//! };
//!
//! let meta = SubmissionMeta {
//!     origin_url: "https://app.example.com/reports".to_string(),
//!     client_identity: "203.0.113.9".to_string(),
//!     user_agent: Some("Mozilla/5.0".to_string()),
//! };
//! # let _ = (raw, meta);
//! ```
use serde::{Deserialize, Serialize};

/// A feedback submission exactly as the transport layer parsed it.
///
/// Nothing here is trusted yet: the message may be blank, the screenshot may
/// exceed limits, and `website` may reveal an automated submitter. Call
/// [`validate`](crate::validate) to turn this into a [`ValidSubmission`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    /// Free-text feedback body. Required; rejected if empty after trimming.
    pub message: String,

    /// Raw screenshot bytes, if the visitor attached or pasted one.
    pub screenshot: Option<Vec<u8>>,

    /// Honeypot trap field. Invisible to humans; a non-empty value marks the
    /// submission as likely automated. See [`is_likely_bot`](crate::is_likely_bot).
    pub website: String,

    /// Opaque project/tenant tag, passed through unmodified.
    pub project: Option<String>,
}

/// Transport-derived metadata that accompanies a submission.
///
/// Produced by the HTTP layer from forwarded-address, origin/referrer, and
/// user-agent headers. The pipeline treats every field as passthrough except
/// `client_identity`, which keys the rate limiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMeta {
    /// URL of the page the widget was embedded in.
    pub origin_url: String,

    /// Rate-limiting key, typically the client network address. Clients with
    /// no derivable address all share the `"unknown"` bucket.
    pub client_identity: String,

    /// User agent of the submitting browser, if sent.
    pub user_agent: Option<String>,
}

/// A submission that passed validation.
///
/// Invariants upheld by [`validate`](crate::validate):
///
/// - `message` is trimmed and non-empty
/// - `screenshot`, when present, is within the configured size limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub message: String,
    pub screenshot: Option<Vec<u8>>,
    pub project: Option<String>,
}

impl RawSubmission {
    /// Convenience constructor for a text-only submission.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ingest::RawSubmission;
    ///
    /// let raw = RawSubmission::text("Dark mode please");
    /// assert!(raw.screenshot.is_none());
    /// assert!(raw.website.is_empty());
    /// ```
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            screenshot: None,
            website: String::new(),
            project: None,
        }
    }
}
