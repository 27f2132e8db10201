//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Feedback (alias to `feedback::Feedback`) — a stored feedback record.

pub mod error;
pub mod feedback;
pub mod ports;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{
    Division, Feedback, FeedbackDraft, FeedbackStatus, FieldError, FieldErrors, NewFeedback,
    ValidationKind, validate,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use feedback_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Feedback not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
