//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain port and remain testable without a database.

use std::sync::Arc;

use crate::domain::ports::FeedbackRepository;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use feedback_backend::domain::ports::FixtureFeedbackRepository;
/// use feedback_backend::inbound::http::state::HttpState;
///
/// let state = HttpState::new(Arc::new(FixtureFeedbackRepository::default()));
/// let _feedback = state.feedback.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub feedback: Arc<dyn FeedbackRepository>,
}

impl HttpState {
    /// Construct state over a feedback repository port.
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }
}
