//! Error types produced by the classify crate.
//!
//! These errors never cross the pipeline boundary: the [`Classify`]
//! trait resolves every failure to `None` after logging. The typed variants
//! exist so the internal call path can be tested precisely and so log lines
//! say what actually went wrong.
//!
//! [`Classify`]: crate::Classify
use thiserror::Error;

/// Errors that can occur while requesting or decoding a classification.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClassifyError {
    /// Client construction was attempted without an API key.
    #[error("no API key configured")]
    MissingApiKey,

    /// The HTTP request itself failed (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api {
        status: u16,
        body: String,
    },

    /// The response parsed but contained no candidate text.
    #[error("empty reply from model")]
    EmptyReply,

    /// The reply text held no JSON object, or the object failed to parse
    /// or to satisfy the classification schema.
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}
