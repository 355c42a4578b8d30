//! Generative-AI classification client.
//!
//! Wraps the Gemini `generateContent` endpoint behind the [`Classify`]
//! trait. The public contract is deliberately infallible: `classify` never
//! raises, it resolves every failure path - transport error, non-success
//! status, empty candidates, unparseable reply, schema violation - to
//! `None` with a `tracing::warn!` diagnostic. Malformed model output must
//! never reach storage or the caller.
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ClassifyConfig;
use crate::error::ClassifyError;
use crate::extract::extract_json_object;
use crate::prompt::build_prompt;
use crate::types::Classification;

/// A screenshot encoded for the multimodal call.
///
/// Produced once per request by the orchestrator and kept only in memory;
/// the encoded copy is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// MIME type sniffed from the magic bytes, `image/png` when unknown.
    pub mime_type: String,
    /// Base64 of the raw screenshot bytes.
    pub data: String,
}

impl EncodedImage {
    /// Encodes raw screenshot bytes, deriving the MIME type from the data
    /// prefix when one is recognizable.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            mime_type: sniff_mime(bytes).to_string(),
            data: BASE64.encode(bytes),
        }
    }
}

/// Best-effort MIME detection from magic bytes. Unrecognized data defaults
/// to `image/png`, which the backend tolerates for all common paste formats.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Classification backend seam.
///
/// The pipeline holds a `dyn Classify` so tests can substitute a scripted
/// backend and so a disabled deployment simply holds none at all.
#[async_trait]
pub trait Classify: Send + Sync {
    /// Classifies one feedback message, optionally with a screenshot.
    ///
    /// Returns a fully valid [`Classification`] or `None`. Implementations
    /// must not error and must not block beyond a bounded timeout.
    async fn classify(
        &self,
        message: &str,
        image: Option<&EncodedImage>,
    ) -> Option<Classification>;
}

/// Gemini-backed [`Classify`] implementation.
pub struct GeminiClassifier {
    config: ClassifyConfig,
    client: reqwest::Client,
}

// Gemini REST wire shapes. Only the fields we use.

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    InlineData {
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClassifier {
    /// Creates a classifier from config.
    ///
    /// # Errors
    ///
    /// [`ClassifyError::MissingApiKey`] when no key is configured - callers
    /// that want classification off should not construct a classifier at
    /// all - and [`ClassifyError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClassifyConfig) -> Result<Self, ClassifyError> {
        if !config.is_enabled() {
            return Err(ClassifyError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { config, client })
    }

    /// The fallible call path. The trait impl funnels every `Err` into a
    /// log line and `None`.
    async fn request_classification(
        &self,
        message: &str,
        image: Option<&EncodedImage>,
    ) -> Result<Classification, ClassifyError> {
        let mut parts = vec![RequestPart::Text {
            text: build_prompt(message),
        }];
        if let Some(img) = image {
            parts.push(RequestPart::InlineData {
                inline_data: InlineData {
                    mime_type: img.mime_type.clone(),
                    data: img.data.clone(),
                },
            });
        }

        let request = GenerateRequest {
            contents: vec![RequestContent { parts }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        );
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        debug!(model = %self.config.model, has_image = image.is_some(), "requesting classification");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Api { status, body });
        }

        let reply: GenerateResponse = response.json().await?;
        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .filter(|t| !t.trim().is_empty())
            .ok_or(ClassifyError::EmptyReply)?;

        parse_reply(text)
    }
}

/// Unwraps and validates a raw model reply into a [`Classification`].
///
/// A fenced reply and the equivalent bare JSON parse identically. Any
/// missing field, unknown enum value, or out-of-range confidence is a
/// [`ClassifyError::MalformedReply`].
pub fn parse_reply(text: &str) -> Result<Classification, ClassifyError> {
    let block = extract_json_object(text)
        .ok_or_else(|| ClassifyError::MalformedReply("no JSON object in reply".into()))?;

    let classification: Classification = serde_json::from_str(block)
        .map_err(|e| ClassifyError::MalformedReply(e.to_string()))?;

    classification
        .check()
        .map_err(ClassifyError::MalformedReply)?;

    Ok(classification)
}

#[async_trait]
impl Classify for GeminiClassifier {
    async fn classify(
        &self,
        message: &str,
        image: Option<&EncodedImage>,
    ) -> Option<Classification> {
        match self.request_classification(message, image).await {
            Ok(classification) => Some(classification),
            Err(err) => {
                warn!(error = %err, "classification failed; continuing without ai data");
                None
            }
        }
    }
}
