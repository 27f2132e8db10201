//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (feedback, health)
//! - **Schemas**: The feedback domain types and the response envelopes the
//!   handlers serialise
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Division, Error, ErrorCode, Feedback, FeedbackDraft, FeedbackStatus};
use crate::inbound::http::feedback::{FeedbackListResponse, FeedbackResponse, MessageResponse};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback backend API",
        description = "HTTP interface for collecting and triaging event feedback."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::feedback::create_feedback,
        crate::inbound::http::feedback::list_feedback,
        crate::inbound::http::feedback::get_feedback,
        crate::inbound::http::feedback::update_feedback,
        crate::inbound::http::feedback::delete_feedback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Feedback,
        FeedbackDraft,
        Division,
        FeedbackStatus,
        FeedbackResponse,
        FeedbackListResponse,
        MessageResponse,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "feedback", description = "Operations on collected feedback"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
