use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ingest::IngestError;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
///
/// Every variant maps to a closed, stable reason string; response bodies
/// never carry internal detail. Abuse/load and degraded-enhancement
/// failures are handled inside the pipeline and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("too many requests")]
    RateLimited,

    #[error("invalid submission: {0}")]
    Invalid(#[from] IngestError),

    #[error("malformed multipart form")]
    MalformedForm,

    #[error("request body exceeds the configured cap")]
    BodyTooLarge,

    #[error("failed to save")]
    StoreFailed,

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found")]
    NotFound,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ServerError::Invalid(err) => StatusCode::from_u16(err.http_status_code())
                .unwrap_or(StatusCode::BAD_REQUEST),
            ServerError::MalformedForm => StatusCode::BAD_REQUEST,
            ServerError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::StoreFailed | ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The reason string sent to the caller. A closed set: clients switch on
    /// these, so they are part of the API contract.
    fn reason(&self) -> &'static str {
        match self {
            ServerError::RateLimited => "too many requests",
            ServerError::Invalid(IngestError::MissingMessage) => "message required",
            ServerError::Invalid(_) => "payload too large",
            ServerError::MalformedForm => "invalid form data",
            ServerError::BodyTooLarge => "payload too large",
            ServerError::StoreFailed => "failed to save",
            ServerError::Internal(_) | ServerError::Config(_) => "internal error",
            ServerError::NotFound => "not found",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The full error goes to the log; only the closed reason string
        // crosses the wire.
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = Json(json!({ "error": self.reason() }));
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_are_the_documented_set() {
        assert_eq!(ServerError::RateLimited.reason(), "too many requests");
        assert_eq!(
            ServerError::Invalid(IngestError::MissingMessage).reason(),
            "message required"
        );
        assert_eq!(ServerError::StoreFailed.reason(), "failed to save");
        assert_eq!(
            ServerError::Internal("detail stays out of the body".into()).reason(),
            "internal error"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServerError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ServerError::Invalid(IngestError::MissingMessage).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Invalid(IngestError::ScreenshotTooLarge {
                actual: 10,
                limit: 5
            })
            .status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServerError::StoreFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
