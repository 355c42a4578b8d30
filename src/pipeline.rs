//! The ingestion orchestrator.
//!
//! [`FeedbackPipeline::handle`] is the whole request-handling story between
//! "a visitor submitted text and maybe an image" and "a classified,
//! persisted feedback record": rate limiter, honeypot, validation,
//! best-effort screenshot upload, classification, persistence handoff,
//! detached notification. Every stage that can fail knows whether its
//! failure is fatal (persistence), reportable (rate limit, validation), or
//! absorbed (upload, classification, notification).
use std::sync::Arc;

use classify::{Classification, Classify, EncodedImage};
use ingest::{is_likely_bot, validate, IngestConfig, IngestError, RawSubmission, SubmissionMeta};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::limiter::RateLimiter;
use crate::record::{FeedbackRecord, FeedbackStatus};
use crate::sinks::{FeedbackNotification, FeedbackStore, Notifier};

/// Longest message slice carried into a notification summary.
const EXCERPT_MAX_CHARS: usize = 160;

/// Outcome of one submission, mapped to the HTTP surface by the server
/// crate.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// Submission persisted (or silently dropped as a honeypot hit; callers
    /// cannot tell the difference, which is the point).
    Accepted {
        id: String,
        ai: Option<Classification>,
    },

    /// Identity exhausted its window budget. Reported as a distinct,
    /// retryable condition.
    RateLimited,

    /// Submission failed validation.
    Invalid(IngestError),

    /// The storage insert failed. The one fatal pipeline failure.
    StoreFailed,
}

/// The assembled pipeline. One instance serves the whole process; every
/// request borrows it concurrently.
pub struct FeedbackPipeline {
    ingest_config: IngestConfig,
    limiter: RateLimiter,
    classifier: Option<Arc<dyn Classify>>,
    store: Arc<dyn FeedbackStore>,
    notifier: Arc<dyn Notifier>,
}

impl FeedbackPipeline {
    /// Wires the pipeline. Pass `classifier: None` to run without AI
    /// classification; every record then persists with `ai: null`.
    pub fn new(
        ingest_config: IngestConfig,
        limiter: RateLimiter,
        classifier: Option<Arc<dyn Classify>>,
        store: Arc<dyn FeedbackStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            ingest_config,
            limiter,
            classifier,
            store,
            notifier,
        }
    }

    /// Runs one submission through the pipeline.
    ///
    /// Stage order and failure policy:
    ///
    /// 1. Rate limiter - reject returns [`IngestOutcome::RateLimited`].
    /// 2. Honeypot - a filled trap returns a synthetic accept with a
    ///    placeholder id and no side effects at all.
    /// 3. Validation - failure returns [`IngestOutcome::Invalid`].
    /// 4. Screenshot upload - best-effort; on failure the record simply has
    ///    no screenshot reference. A base64 copy is kept in memory for the
    ///    classification call only.
    /// 5. Classification - `None` on any failure, and the request proceeds.
    /// 6. Persistence - failure is fatal: [`IngestOutcome::StoreFailed`].
    /// 7. Notification - dispatched on a detached task, outcome ignored.
    pub async fn handle(&self, raw: RawSubmission, meta: SubmissionMeta) -> IngestOutcome {
        if !self.limiter.admit(&meta.client_identity) {
            debug!(identity = %meta.client_identity, "rate limited");
            return IngestOutcome::RateLimited;
        }

        if is_likely_bot(&raw.website) {
            // Indistinguishable from a real accept on the wire: fresh id,
            // no classification - exactly what a keyless deployment returns.
            info!(identity = %meta.client_identity, "honeypot hit; faking success");
            return IngestOutcome::Accepted {
                id: Uuid::new_v4().to_string(),
                ai: None,
            };
        }

        let valid = match validate(raw, &self.ingest_config) {
            Ok(valid) => valid,
            Err(err) => {
                debug!(error = %err, "submission rejected");
                return IngestOutcome::Invalid(err);
            }
        };

        let mut screenshot_url = None;
        let mut encoded_image = None;
        if let Some(bytes) = valid.screenshot.as_deref() {
            let image = EncodedImage::from_bytes(bytes);
            match self.store.upload_screenshot(bytes, &image.mime_type).await {
                Ok(url) => screenshot_url = Some(url),
                Err(err) => {
                    warn!(error = %err, "screenshot upload failed; persisting without reference");
                }
            }
            encoded_image = Some(image);
        }

        let ai = match &self.classifier {
            Some(classifier) => {
                classifier
                    .classify(&valid.message, encoded_image.as_ref())
                    .await
            }
            None => None,
        };

        let record = FeedbackRecord {
            origin_url: meta.origin_url.clone(),
            user_agent: meta.user_agent.clone(),
            message: valid.message.clone(),
            screenshot_url,
            ai: ai.clone(),
            project: valid.project.clone(),
            status: FeedbackStatus::New,
            created_at: chrono::Utc::now(),
        };

        let id = match self.store.insert(&record).await {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(error = %err, "feedback insert failed");
                return IngestOutcome::StoreFailed;
            }
        };

        self.dispatch_notification(&id, &meta, &valid.message, ai.as_ref());

        IngestOutcome::Accepted { id, ai }
    }

    /// Hands the summary to the notifier on a detached task. The request
    /// does not wait for it and never learns how it went.
    fn dispatch_notification(
        &self,
        id: &str,
        meta: &SubmissionMeta,
        message: &str,
        ai: Option<&Classification>,
    ) {
        let notification = FeedbackNotification {
            id: id.to_string(),
            origin_url: meta.origin_url.clone(),
            excerpt: excerpt(message),
            category: ai.map(|c| c.suggested_category),
            priority: ai.map(|c| c.suggested_priority),
        };
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            notifier.notify(&notification).await;
        });
    }
}

/// Leading slice of `message`, cut at a char boundary.
fn excerpt(message: &str) -> String {
    match message.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{MemoryFeedbackStore, StoreError};
    use async_trait::async_trait;
    use classify::{Category, Priority};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubClassifier {
        result: Option<Classification>,
    }

    #[async_trait]
    impl Classify for StubClassifier {
        async fn classify(
            &self,
            _message: &str,
            _image: Option<&EncodedImage>,
        ) -> Option<Classification> {
            self.result.clone()
        }
    }

    struct FailingStore;

    #[async_trait]
    impl FeedbackStore for FailingStore {
        async fn insert(&self, _record: &FeedbackRecord) -> Result<String, StoreError> {
            Err(StoreError("connection refused".into()))
        }

        async fn upload_screenshot(
            &self,
            _bytes: &[u8],
            _content_type: &str,
        ) -> Result<String, StoreError> {
            Err(StoreError("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<FeedbackNotification>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: &FeedbackNotification) {
            self.seen.lock().unwrap().push(notification.clone());
        }
    }

    fn meta() -> SubmissionMeta {
        SubmissionMeta {
            origin_url: "https://app.example.com".into(),
            client_identity: "203.0.113.9".into(),
            user_agent: Some("test-agent".into()),
        }
    }

    fn sample_classification() -> Classification {
        serde_json::from_value(serde_json::json!({
            "title": "Export broken",
            "summary": "Export does nothing.",
            "key_details": [],
            "suggested_category": "bug",
            "feature_area": "reporting",
            "suggested_priority": "high",
            "confidence": 0.9
        }))
        .unwrap()
    }

    fn pipeline(
        classifier: Option<Arc<dyn Classify>>,
        store: Arc<dyn FeedbackStore>,
        notifier: Arc<dyn Notifier>,
    ) -> FeedbackPipeline {
        FeedbackPipeline::new(
            IngestConfig::default(),
            RateLimiter::new(10, Duration::from_secs(60)),
            classifier,
            store,
            notifier,
        )
    }

    async fn settle() {
        // Let detached notification tasks run to completion.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn accepted_without_classifier_persists_with_null_ai() {
        let store = Arc::new(MemoryFeedbackStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let p = pipeline(None, store.clone(), notifier.clone());

        let outcome = p.handle(RawSubmission::text("It broke"), meta()).await;
        let IngestOutcome::Accepted { id, ai } = outcome else {
            panic!("expected accept, got {outcome:?}");
        };
        assert!(ai.is_none());
        assert!(!id.is_empty());

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, id);
        assert!(records[0].1.ai.is_none());
        assert_eq!(records[0].1.origin_url, "https://app.example.com");

        settle().await;
        assert_eq!(notifier.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn honeypot_hit_fakes_success_with_no_side_effects() {
        let store = Arc::new(MemoryFeedbackStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let p = pipeline(None, store.clone(), notifier.clone());

        let raw = RawSubmission {
            message: "buy cheap pills".into(),
            screenshot: None,
            website: "https://spam.example".into(),
            project: None,
        };
        let outcome = p.handle(raw, meta()).await;

        assert!(matches!(outcome, IngestOutcome::Accepted { ai: None, .. }));
        settle().await;
        assert!(store.is_empty(), "honeypot hits must not persist");
        assert_eq!(store.screenshot_count(), 0);
        assert!(notifier.seen.lock().unwrap().is_empty(), "and must not notify");
    }

    #[tokio::test]
    async fn empty_message_is_invalid() {
        let store = Arc::new(MemoryFeedbackStore::new());
        let p = pipeline(None, store.clone(), Arc::new(RecordingNotifier::default()));

        let outcome = p.handle(RawSubmission::text("   \n  "), meta()).await;
        assert_eq!(outcome, IngestOutcome::Invalid(IngestError::MissingMessage));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn rate_limit_rejects_before_anything_else() {
        let store = Arc::new(MemoryFeedbackStore::new());
        let p = FeedbackPipeline::new(
            IngestConfig::default(),
            RateLimiter::new(2, Duration::from_secs(60)),
            None,
            store.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        for _ in 0..2 {
            let outcome = p.handle(RawSubmission::text("ok"), meta()).await;
            assert!(matches!(outcome, IngestOutcome::Accepted { .. }));
        }
        let outcome = p.handle(RawSubmission::text("ok"), meta()).await;
        assert_eq!(outcome, IngestOutcome::RateLimited);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn store_failure_is_fatal_and_skips_notification() {
        let notifier = Arc::new(RecordingNotifier::default());
        let p = pipeline(None, Arc::new(FailingStore), notifier.clone());

        let outcome = p.handle(RawSubmission::text("save me"), meta()).await;
        assert_eq!(outcome, IngestOutcome::StoreFailed);

        settle().await;
        assert!(notifier.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_does_not_abort_the_request() {
        // FailingStore rejects uploads; pair it with a working insert.
        struct UploadFailsStore(MemoryFeedbackStore);

        #[async_trait]
        impl FeedbackStore for UploadFailsStore {
            async fn insert(&self, record: &FeedbackRecord) -> Result<String, StoreError> {
                self.0.insert(record).await
            }

            async fn upload_screenshot(
                &self,
                _bytes: &[u8],
                _content_type: &str,
            ) -> Result<String, StoreError> {
                Err(StoreError("bucket unavailable".into()))
            }
        }

        let store = Arc::new(UploadFailsStore(MemoryFeedbackStore::new()));
        let p = FeedbackPipeline::new(
            IngestConfig::default(),
            RateLimiter::new(10, Duration::from_secs(60)),
            None,
            store.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        let raw = RawSubmission {
            message: "screenshot attached".into(),
            screenshot: Some(vec![0x89, b'P', b'N', b'G']),
            website: String::new(),
            project: None,
        };
        let outcome = p.handle(raw, meta()).await;

        assert!(matches!(outcome, IngestOutcome::Accepted { .. }));
        let records = store.0.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].1.screenshot_url.is_none());
    }

    #[tokio::test]
    async fn classification_flows_into_record_and_notification() {
        let store = Arc::new(MemoryFeedbackStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let classifier = Arc::new(StubClassifier {
            result: Some(sample_classification()),
        });
        let p = pipeline(Some(classifier), store.clone(), notifier.clone());

        let outcome = p
            .handle(RawSubmission::text("Export button does nothing"), meta())
            .await;
        let IngestOutcome::Accepted { ai, .. } = outcome else {
            panic!("expected accept");
        };
        assert_eq!(ai.as_ref().unwrap().suggested_category, Category::Bug);

        let records = store.records();
        let stored_ai = records[0].1.ai.as_ref().unwrap();
        assert_eq!(stored_ai.suggested_priority, Priority::High);

        settle().await;
        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen[0].category, Some(Category::Bug));
        assert_eq!(seen[0].priority, Some(Priority::High));
    }

    #[tokio::test]
    async fn classifier_miss_still_persists() {
        let store = Arc::new(MemoryFeedbackStore::new());
        let classifier = Arc::new(StubClassifier { result: None });
        let p = pipeline(
            Some(classifier),
            store.clone(),
            Arc::new(RecordingNotifier::default()),
        );

        let outcome = p.handle(RawSubmission::text("anything"), meta()).await;
        assert!(matches!(outcome, IngestOutcome::Accepted { ai: None, .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let long = "ä".repeat(200);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), EXCERPT_MAX_CHARS);

        assert_eq!(excerpt("short"), "short");
    }
}
