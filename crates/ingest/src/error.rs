//! Error types produced by the ingest crate.
//!
//! All errors are typed, cloneable, and comparable to enable precise error
//! handling and testing. The HTTP layer maps each variant to a status code
//! and a stable, closed reason string; nothing here ever carries internal
//! detail that could leak into a response body.
//!
//! # Error Categories
//!
//! | Error | Category | HTTP |
//! |-------|----------|------|
//! | [`MissingMessage`](IngestError::MissingMessage) | Validation | 400 |
//! | [`MessageTooLong`](IngestError::MessageTooLong) | Validation | 413 |
//! | [`ScreenshotTooLarge`](IngestError::ScreenshotTooLarge) | Validation | 413 |
use thiserror::Error;

/// Errors that can occur while validating a feedback submission.
///
/// The enum is marked `#[non_exhaustive]` to allow future additions without
/// breaking existing code. Callers should always include a catch-all arm when
/// matching.
///
/// # Examples
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::MissingMessage;
/// assert_eq!(err.to_string(), "message required");
/// assert_eq!(err.http_status_code(), 400);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// Message text missing or empty after trimming whitespace.
    ///
    /// The message is the one mandatory field of a submission; a record with
    /// no text would be untriagable.
    #[error("message required")]
    MissingMessage,

    /// Message text exceeds the configured byte limit.
    #[error("message too long: {actual} bytes exceeds limit of {limit}")]
    MessageTooLong {
        /// Byte length of the trimmed message.
        actual: usize,
        /// Configured upper bound.
        limit: usize,
    },

    /// Screenshot exceeds the configured byte limit.
    ///
    /// The transport boundary enforces a hard cap first; this variant fires
    /// when the validator's own re-check trips.
    #[error("screenshot too large: {actual} bytes exceeds limit of {limit}")]
    ScreenshotTooLarge {
        /// Byte length of the attached screenshot.
        actual: usize,
        /// Configured upper bound.
        limit: usize,
    },
}

impl IngestError {
    /// Returns true if this error indicates a client-side issue.
    ///
    /// All ingest errors are client-side issues (invalid input), so this
    /// always returns true. It is provided for API consistency with error
    /// types that have server-side variants.
    pub fn is_client_error(&self) -> bool {
        true
    }

    /// Returns a suggested HTTP status code for this error.
    ///
    /// # Status Codes
    ///
    /// - `MessageTooLong`, `ScreenshotTooLarge`: 413
    /// - All others: 400
    pub fn http_status_code(&self) -> u16 {
        match self {
            IngestError::MessageTooLong { .. } | IngestError::ScreenshotTooLarge { .. } => 413,
            _ => 400,
        }
    }
}
