//! Feedback HTTP handlers.
//!
//! ```text
//! POST   /api       Submit a feedback record
//! GET    /api       List all feedback, newest first
//! GET    /api/{id}  Fetch one record by id
//! PUT    /api/{id}  Replace a record, optionally setting its status
//! DELETE /api/{id}  Remove a record
//! ```
//!
//! Every success response wraps its payload in a `{message, data}` envelope;
//! delete confirms with a message alone.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::feedback::{Feedback, FeedbackDraft, ValidationKind, validate};
use crate::domain::{ApiResult, Error};
use crate::inbound::http::state::HttpState;

/// Success envelope carrying a single feedback record.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub message: String,
    pub data: Feedback,
}

/// Success envelope carrying the full feedback listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackListResponse {
    pub message: String,
    pub data: Vec<Feedback>,
}

/// Success envelope for operations that return no record body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse the `{id}` path segment.
///
/// Non-numeric ids are rejected as malformed requests rather than crashing
/// the handler or aliasing onto an arbitrary record.
fn parse_id(raw: &str) -> Result<i32, Error> {
    raw.parse::<i32>()
        .map_err(|_| Error::invalid_request("Feedback id must be an integer"))
}

/// Submit a new feedback record.
#[utoipa::path(
    post,
    path = "/api",
    request_body = FeedbackDraft,
    responses(
        (status = 201, description = "Feedback stored", body = FeedbackResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Store rejected a duplicate", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "createFeedback"
)]
#[post("")]
pub async fn create_feedback(
    state: web::Data<HttpState>,
    payload: web::Json<FeedbackDraft>,
) -> ApiResult<HttpResponse> {
    let record = validate(ValidationKind::Create, &payload)?;
    let stored = state.feedback.create(&record).await?;

    Ok(HttpResponse::Created().json(FeedbackResponse {
        message: "Feedback created successfully".to_owned(),
        data: stored,
    }))
}

/// List every feedback record, newest first.
#[utoipa::path(
    get,
    path = "/api",
    responses(
        (status = 200, description = "All feedback records", body = FeedbackListResponse),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "listFeedback"
)]
#[get("")]
pub async fn list_feedback(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<FeedbackListResponse>> {
    let records = state.feedback.list().await?;

    Ok(web::Json(FeedbackListResponse {
        message: "Feedbacks retrieved successfully".to_owned(),
        data: records,
    }))
}

/// Fetch one feedback record by id.
#[utoipa::path(
    get,
    path = "/api/{id}",
    params(("id" = i32, Path, description = "Feedback record id")),
    responses(
        (status = 200, description = "The addressed record", body = FeedbackResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No record carries this id", body = MessageResponse),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "getFeedback"
)]
#[get("/{id}")]
pub async fn get_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;

    match state.feedback.find_by_id(id).await? {
        Some(record) => Ok(HttpResponse::Ok().json(FeedbackResponse {
            message: "Feedback retrieved successfully".to_owned(),
            data: record,
        })),
        // Lookup misses answer with a bare message rather than the error
        // envelope.
        None => Ok(HttpResponse::NotFound().json(MessageResponse::new("Feedback not found"))),
    }
}

/// Replace all mutable fields of a feedback record.
#[utoipa::path(
    put,
    path = "/api/{id}",
    params(("id" = i32, Path, description = "Feedback record id")),
    request_body = FeedbackDraft,
    responses(
        (status = 200, description = "The updated record", body = FeedbackResponse),
        (status = 400, description = "Validation failed or malformed id", body = Error),
        (status = 404, description = "No record carries this id", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "updateFeedback"
)]
#[put("/{id}")]
pub async fn update_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<FeedbackDraft>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let record = validate(ValidationKind::Update, &payload)?;

    let updated = state
        .feedback
        .update(id, &record)
        .await?
        .ok_or_else(|| Error::not_found("Feedback not found"))?;

    Ok(HttpResponse::Ok().json(FeedbackResponse {
        message: "Feedback updated successfully".to_owned(),
        data: updated,
    }))
}

/// Remove a feedback record.
#[utoipa::path(
    delete,
    path = "/api/{id}",
    params(("id" = i32, Path, description = "Feedback record id")),
    responses(
        (status = 200, description = "Record removed", body = MessageResponse),
        (status = 400, description = "Malformed id", body = Error),
        (status = 404, description = "No record carries this id", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["feedback"],
    operation_id = "deleteFeedback"
)]
#[delete("/{id}")]
pub async fn delete_feedback(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;

    if !state.feedback.delete(id).await? {
        return Err(Error::not_found("Feedback not found"));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Feedback deleted successfully")))
}
