//! Workspace umbrella crate for the feedbackd ingestion pipeline.
//!
//! This crate stitches together submission validation, rate limiting, AI
//! classification, and the storage/notification seams so the HTTP surface
//! can run one call: [`FeedbackPipeline::handle`]. The member crates own
//! their stages; this crate owns the sequencing and the failure policy
//! between them.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use feedbackd::{
//!     FeedbackPipeline, LogNotifier, MemoryFeedbackStore, RateLimiter,
//! };
//! use ingest::{IngestConfig, RawSubmission, SubmissionMeta};
//!
//! # async fn run() {
//! let pipeline = FeedbackPipeline::new(
//!     IngestConfig::default(),
//!     RateLimiter::new(10, Duration::from_secs(60)),
//!     None, // no classifier configured; records persist with ai: null
//!     Arc::new(MemoryFeedbackStore::new()),
//!     Arc::new(LogNotifier),
//! );
//!
//! let raw = RawSubmission::text("The export button does nothing");
//! let meta = SubmissionMeta {
//!     origin_url: "https://app.example.com/reports".into(),
//!     client_identity: "203.0.113.9".into(),
//!     user_agent: None,
//! };
//! let outcome = pipeline.handle(raw, meta).await;
//! # let _ = outcome;
//! # }
//! ```

pub use classify::{
    Category, Classification, Classify, ClassifyConfig, ClassifyError, EncodedImage,
    GeminiClassifier, Priority,
};
pub use ingest::{
    is_likely_bot, validate, ConfigError, IngestConfig, IngestError, RawSubmission,
    SubmissionMeta, ValidSubmission,
};

mod limiter;
mod pipeline;
mod record;
mod sinks;

pub use crate::limiter::{RateLimitConfig, RateLimiter};
pub use crate::pipeline::{FeedbackPipeline, IngestOutcome};
pub use crate::record::{FeedbackRecord, FeedbackStatus};
pub use crate::sinks::{
    FeedbackNotification, FeedbackStore, LogNotifier, MemoryFeedbackStore, Notifier, StoreError,
};
