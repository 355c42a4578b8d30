//! Classification schema types.
//!
//! The model is asked for a single JSON object matching [`Classification`].
//! Deserialization is the schema check: the category and priority enums are
//! closed (an unknown value fails serde), required fields must be present,
//! and [`Classification::check`] enforces the numeric constraint on
//! `confidence`. Callers outside this crate only ever see a fully valid
//! `Classification` or nothing at all.
use serde::{Deserialize, Serialize};

/// Closed set of feedback categories the model may choose from.
///
/// Serialized in lowercase on the wire (`"bug"`, `"feature"`, …). Any value
/// outside this set fails deserialization, which the client treats like any
/// other malformed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bug,
    Feature,
    Question,
    Billing,
    Praise,
    Other,
}

/// Closed set of triage priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Structured description of a feedback submission, as produced by the model.
///
/// Field names double as the JSON contract given to the model in the prompt
/// and as the `ai_data` wire shape returned to the widget.
///
/// # Examples
///
/// ```rust
/// use classify::{Category, Classification, Priority};
///
/// let json = r#"{
///     "title": "Export button unresponsive",
///     "summary": "Clicking Export on the reports page does nothing.",
///     "key_details": ["reports page", "no error shown"],
///     "suggested_category": "bug",
///     "feature_area": "reporting",
///     "suggested_priority": "high",
///     "steps": ["Open reports", "Click Export"],
///     "expected": "A CSV download starts",
///     "confidence": 0.92,
///     "clarifying_questions": []
/// }"#;
///
/// let c: Classification = serde_json::from_str(json).unwrap();
/// assert_eq!(c.suggested_category, Category::Bug);
/// assert_eq!(c.suggested_priority, Priority::High);
/// assert!(c.check().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Short issue-tracker-style title.
    pub title: String,

    /// One- or two-sentence summary of the feedback.
    pub summary: String,

    /// Salient facts pulled out of the message, in order of appearance.
    pub key_details: Vec<String>,

    /// Category from the closed [`Category`] set.
    pub suggested_category: Category,

    /// Free-form product-area label; the model picks the vocabulary.
    pub feature_area: String,

    /// Priority from the closed [`Priority`] set.
    pub suggested_priority: Priority,

    /// Reproduction steps, when the message describes any.
    #[serde(default)]
    pub steps: Vec<String>,

    /// What the submitter expected to happen, when stated.
    #[serde(default)]
    pub expected: Option<String>,

    /// Model self-assessed confidence in `[0, 1]`.
    pub confidence: f32,

    /// Up to two follow-up questions worth asking the submitter.
    /// Convention, not enforced.
    #[serde(default)]
    pub clarifying_questions: Vec<String>,
}

impl Classification {
    /// Enforces the constraints serde cannot express.
    ///
    /// Currently that is the `confidence` range: it must be finite and within
    /// `[0, 1]`. A violation makes the whole value invalid; there is no
    /// partially-valid classification.
    pub fn check(&self) -> Result<(), String> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            ));
        }
        Ok(())
    }
}
