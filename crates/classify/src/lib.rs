//! Feedbackd classification crate.
//!
//! Sends feedback text (and optionally a screenshot) to a generative-AI
//! endpoint and turns the reply into a validated [`Classification`] - or
//! into nothing. The crate's one hard rule: callers receive a fully
//! well-formed classification or `None`, never anything in between, and
//! never an error. An unavailable or misbehaving model backend degrades the
//! pipeline, it does not fail it.
//!
//! # Failure Handling
//!
//! | Failure | Result |
//! |---------|--------|
//! | No API key configured | classifier not constructed; pipeline skips |
//! | Network error / timeout | `None` + warn log |
//! | Non-success API status | `None` + warn log |
//! | Empty candidates | `None` + warn log |
//! | Reply not JSON / fenced garbage | `None` + warn log |
//! | Missing field / unknown enum value | `None` + warn log |
//! | `confidence` outside `[0, 1]` | `None` + warn log |
//!
//! # Example
//!
//! ```rust,no_run
//! use classify::{Classify, ClassifyConfig, GeminiClassifier};
//!
//! # async fn run() {
//! let config = ClassifyConfig {
//!     api_key: Some("key".into()),
//!     ..Default::default()
//! };
//! let classifier = GeminiClassifier::new(config).unwrap();
//! let ai = classifier.classify("Dark mode please!", None).await;
//! // `ai` is None on any failure; the caller persists either way.
//! # let _ = ai;
//! # }
//! ```
mod client;
mod config;
mod error;
mod extract;
mod prompt;
mod types;

pub use crate::client::{parse_reply, Classify, EncodedImage, GeminiClassifier};
pub use crate::config::ClassifyConfig;
pub use crate::error::ClassifyError;
pub use crate::extract::extract_json_object;
pub use crate::prompt::build_prompt;
pub use crate::types::{Category, Classification, Priority};
