//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.
//!
//! Two envelope shapes exist on the wire. Validation failures render as
//! `{"error": <message>, "details": [...]}` so clients can highlight every
//! offending field. Everything else renders as `{"error": <HTTP phrase>,
//! "message": <text>}` where the phrase comes from the response status.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::domain::ports::FeedbackRepositoryError;
use crate::domain::{Error, ErrorCode};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render the wire envelope for an error.
///
/// Details are only emitted on the validation shape; any details attached to
/// other error codes stay out of the response so internal diagnostics cannot
/// reach clients.
fn envelope(err: &Error) -> Value {
    match (err.code(), err.details()) {
        (ErrorCode::InvalidRequest, Some(details)) => json!({
            "error": err.message(),
            "details": details,
        }),
        (code, _) => json!({
            "error": status_for(code).canonical_reason().unwrap_or("Unknown Error"),
            "message": err.message(),
        }),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(envelope(self))
    }
}

impl From<FeedbackRepositoryError> for Error {
    fn from(err: FeedbackRepositoryError) -> Self {
        match err {
            FeedbackRepositoryError::Duplicate { message } => Error::conflict(message),
            FeedbackRepositoryError::Constraint { message } => Error::invalid_request(message),
            FeedbackRepositoryError::Connection { message }
            | FeedbackRepositoryError::Query { message } => {
                error!(message, "feedback repository failure");
                Error::internal("Database error occurred")
            }
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Map JSON body extraction failures onto the domain error envelope.
///
/// Wired through `actix_web::web::JsonConfig::error_handler` so malformed
/// payloads are rejected with the same shape as every other bad request.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    debug!(error = %err, "rejected malformed request body");
    Error::invalid_request("Invalid request body").into()
}
