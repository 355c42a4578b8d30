//! Feedbackd Ingest Layer
//!
//! This is where a feedback submission enters the pipeline. We take whatever
//! the transport layer parsed out of the multipart form, run it through the
//! honeypot check and field validation, and hand downstream stages a
//! submission they can trust.
//!
//! ## What we do here
//!
//! - **Bot filtering** - Inspect the hidden trap field. Bots fill it, humans
//!   can't see it.
//! - **Validate fields** - Message required and non-empty after trim,
//!   screenshot bounded in size. Nothing else is mandatory.
//! - **Typed errors** - Every rejection is a typed [`IngestError`] the HTTP
//!   layer can map to a status code and a stable reason string.
//!
//! ## Main entry points
//!
//! Call [`is_likely_bot`] with the trap-field value first; a positive result
//! means the caller should fake success and do nothing else. Then call
//! [`validate`] with a [`RawSubmission`] and [`IngestConfig`] to get a
//! [`ValidSubmission`].
//!
//! ## Example
//!
//! ```
//! use ingest::{is_likely_bot, validate, IngestConfig, RawSubmission};
//!
//! let config = IngestConfig::default();
//! let raw = RawSubmission {
//!     message: "  Export to CSV silently fails  ".into(),
//!     screenshot: None,
//!     website: String::new(),
//!     project: Some("billing-app".into()),
//! };
//!
//! assert!(!is_likely_bot(&raw.website));
//! let valid = validate(raw, &config).unwrap();
//! assert_eq!(valid.message, "Export to CSV silently fails");
//! ```
mod config;
mod error;
mod types;
mod validate;

pub use crate::config::{ConfigError, IngestConfig, DEFAULT_MAX_SCREENSHOT_BYTES};
pub use crate::error::IngestError;
pub use crate::types::{RawSubmission, SubmissionMeta, ValidSubmission};
pub use crate::validate::{is_likely_bot, validate};
