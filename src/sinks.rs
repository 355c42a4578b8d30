//! Collaborator seams: storage and notification.
//!
//! The pipeline does not know how records are persisted or how anyone gets
//! told about them; it talks to these traits. Production deployments plug in
//! their database and email service; tests and the dev server use the
//! in-memory implementations below.
use crate::record::FeedbackRecord;
use async_trait::async_trait;
use classify::{Category, Priority};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Failure from a storage collaborator. The message is for logs; it never
/// reaches a response body.
#[derive(Debug, Error, Clone)]
#[error("storage error: {0}")]
pub struct StoreError(pub String);

/// Durable storage sink for feedback records and screenshot blobs.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Persists a record and returns its store-assigned identity.
    ///
    /// This is the one pipeline step whose failure is fatal to a request;
    /// implementations should not retry on the caller's behalf.
    async fn insert(&self, record: &FeedbackRecord) -> Result<String, StoreError>;

    /// Uploads screenshot bytes and returns a public reference.
    ///
    /// Best-effort from the pipeline's point of view: a failure here means
    /// the record is persisted without a screenshot reference.
    async fn upload_screenshot(
        &self,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StoreError>;
}

/// Summary handed to the notification sink for each accepted record.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackNotification {
    pub id: String,
    pub origin_url: String,
    /// Leading slice of the message, bounded for subject lines.
    pub excerpt: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

/// Fire-and-forget notification sink.
///
/// Called on a detached task after the record is durable; the pipeline never
/// waits for or observes the outcome. Implementations own their error
/// logging.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &FeedbackNotification);
}

/// In-memory [`FeedbackStore`] for tests and the dev default.
///
/// Records live in a `Vec` behind a mutex; identities are fresh UUIDs, the
/// same shape a real store hands out.
#[derive(Default)]
pub struct MemoryFeedbackStore {
    records: Mutex<Vec<(String, FeedbackRecord)>>,
    screenshots: Mutex<Vec<(String, usize)>>,
}

impl MemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far, in insertion order.
    pub fn records(&self) -> Vec<(String, FeedbackRecord)> {
        self.records.lock().expect("memory store poisoned").clone()
    }

    /// Number of inserted records.
    pub fn len(&self) -> usize {
        self.records.lock().expect("memory store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of uploaded screenshots.
    pub fn screenshot_count(&self) -> usize {
        self.screenshots.lock().expect("memory store poisoned").len()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn insert(&self, record: &FeedbackRecord) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.records
            .lock()
            .expect("memory store poisoned")
            .push((id.clone(), record.clone()));
        Ok(id)
    }

    async fn upload_screenshot(
        &self,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let url = format!("memory://screenshots/{id}");
        self.screenshots
            .lock()
            .expect("memory store poisoned")
            .push((url.clone(), bytes.len()));
        Ok(url)
    }
}

/// [`Notifier`] that writes the summary to the log and nothing else.
/// Stands in for the email sink in dev and test deployments.
#[derive(Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &FeedbackNotification) {
        info!(
            id = %notification.id,
            origin = %notification.origin_url,
            category = ?notification.category,
            priority = ?notification.priority,
            excerpt = %notification.excerpt,
            "new feedback"
        );
    }
}
