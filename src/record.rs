//! The persisted feedback record shape.
use chrono::{DateTime, Utc};
use classify::Classification;
use serde::{Deserialize, Serialize};

/// Triage lifecycle of a stored record. The pipeline only ever writes
/// [`New`](FeedbackStatus::New); the later states belong to whatever triage
/// tooling sits on top of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    New,
    InProgress,
    Resolved,
    Closed,
}

/// One accepted submission, assembled by the pipeline and handed to the
/// storage sink. Created once, never mutated by this crate; identity and
/// update timestamps are the store's concern.
///
/// Note what is *not* here: raw screenshot bytes. The record carries only a
/// storage reference; the base64 copy made for the classification call
/// never leaves memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// URL of the page the widget was embedded in.
    pub origin_url: String,

    /// Submitting browser's user agent, if sent.
    pub user_agent: Option<String>,

    /// The feedback text, trimmed.
    pub message: String,

    /// Public locator of the uploaded screenshot, when the upload succeeded.
    pub screenshot_url: Option<String>,

    /// AI classification, when the model produced a valid one.
    pub ai: Option<Classification>,

    /// Opaque project/tenant tag, passed through.
    pub project: Option<String>,

    /// Always [`FeedbackStatus::New`] at insert time.
    pub status: FeedbackStatus,

    /// When the pipeline accepted the submission.
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Starts a record with the fields every accepted submission has,
    /// leaving the optional enrichments to the pipeline stages.
    pub fn new(origin_url: String, user_agent: Option<String>, message: String) -> Self {
        Self {
            origin_url,
            user_agent,
            message,
            screenshot_url: None,
            ai: None,
            project: None,
            status: FeedbackStatus::New,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::New).unwrap(),
            "\"new\""
        );
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn new_record_starts_clean() {
        let record = FeedbackRecord::new("https://a".into(), None, "msg".into());
        assert_eq!(record.status, FeedbackStatus::New);
        assert!(record.screenshot_url.is_none());
        assert!(record.ai.is_none());
    }
}
