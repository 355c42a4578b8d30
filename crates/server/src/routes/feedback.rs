//! The submission endpoint.
//!
//! `POST /api/v1/feedback` takes the widget's multipart form - `message`,
//! optional `screenshot`, the `website` honeypot, optional `project` - plus
//! transport metadata from the request headers, and runs it through the
//! ingestion pipeline. The handler owns exactly two jobs: parsing the form
//! into a [`RawSubmission`] and mapping [`IngestOutcome`] onto the HTTP
//! contract. Everything interesting happens in the pipeline.
use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use classify::Classification;
use feedbackd::IngestOutcome;
use ingest::{RawSubmission, SubmissionMeta};
use serde::Serialize;
use std::sync::Arc;

/// Shared bucket for clients with no derivable address. All such clients
/// split one rate budget; deliberate policy, not a bug.
const UNKNOWN_IDENTITY: &str = "unknown";

/// Success body: the stored id and the classification (or null).
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub id: String,
    pub ai_data: Option<Classification>,
}

/// Accept one feedback submission.
pub async fn submit_feedback(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ServerResult<impl IntoResponse> {
    let meta = submission_meta(&headers);
    let raw = parse_form(multipart).await?;

    match state.pipeline.handle(raw, meta).await {
        IngestOutcome::Accepted { id, ai } => Ok(Json(IngestResponse { id, ai_data: ai })),
        IngestOutcome::RateLimited => Err(ServerError::RateLimited),
        IngestOutcome::Invalid(err) => Err(ServerError::Invalid(err)),
        IngestOutcome::StoreFailed => Err(ServerError::StoreFailed),
    }
}

/// Reads the multipart form into a [`RawSubmission`].
///
/// Unknown fields are skipped so widget versions can drift. A missing
/// `message` field leaves the submission empty and the validator rejects it
/// downstream; form-level errors map to 400, body-cap hits to 413.
async fn parse_form(mut multipart: Multipart) -> ServerResult<RawSubmission> {
    let mut raw = RawSubmission {
        message: String::new(),
        screenshot: None,
        website: String::new(),
        project: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "message" => raw.message = field.text().await.map_err(form_error)?,
            "screenshot" => {
                let bytes = field.bytes().await.map_err(form_error)?;
                if !bytes.is_empty() {
                    raw.screenshot = Some(bytes.to_vec());
                }
            }
            "website" => raw.website = field.text().await.map_err(form_error)?,
            "project" => {
                let value = field.text().await.map_err(form_error)?;
                if !value.trim().is_empty() {
                    raw.project = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(raw)
}

fn form_error(err: axum::extract::multipart::MultipartError) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::BodyTooLarge
    } else {
        ServerError::MalformedForm
    }
}

/// Derives the transport metadata the pipeline treats as passthrough.
fn submission_meta(headers: &HeaderMap) -> SubmissionMeta {
    SubmissionMeta {
        origin_url: origin_url(headers),
        client_identity: client_identity(headers),
        user_agent: header_str(headers, "user-agent"),
    }
}

/// Rate-limit identity: first forwarded client address, else the direct
/// peer address header, else the shared [`UNKNOWN_IDENTITY`] bucket.
fn client_identity(headers: &HeaderMap) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    header_str(headers, "x-real-ip")
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string())
}

/// Page the widget was embedded in: `origin` header, falling back to
/// `referer`, falling back to empty.
fn origin_url(headers: &HeaderMap) -> String {
    header_str(headers, "origin")
        .or_else(|| header_str(headers, "referer"))
        .unwrap_or_default()
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
