//! Port for feedback persistence.
//!
//! The [`FeedbackRepository`] trait defines the contract for storing and
//! retrieving feedback records. Adapters implement this trait to provide
//! durable storage (e.g., PostgreSQL); the in-memory fixture backs handler
//! tests without a database.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::feedback::{Feedback, NewFeedback};

/// Errors raised by feedback repository adapters.
///
/// Messages on `Duplicate` and `Constraint` are client-safe phrases chosen
/// by the adapter's error translation; raw store diagnostics stay in the
/// adapter's logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackRepositoryError {
    /// Repository connection could not be established.
    #[error("feedback repository connection failed: {message}")]
    Connection { message: String },
    /// A stored uniqueness rule rejected the write.
    #[error("feedback repository rejected a duplicate: {message}")]
    Duplicate { message: String },
    /// A stored integrity rule rejected the write.
    #[error("feedback repository constraint failed: {message}")]
    Constraint { message: String },
    /// Query or mutation failed during execution.
    #[error("feedback repository query failed: {message}")]
    Query { message: String },
}

impl FeedbackRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for feedback storage and retrieval.
///
/// The store assigns `id` and `created_at` on creation; ids are never
/// reused or mutated. Updates replace every mutable field of the addressed
/// record, so an update without `status` clears a previously set one.
/// Listing returns the whole result set ordered most-recent-first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a new record and return it with store-assigned fields.
    async fn create(&self, record: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError>;

    /// Fetch every record, newest first (`created_at` descending, ties
    /// broken by `id` descending).
    async fn list(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError>;

    /// Fetch one record by id.
    ///
    /// Returns `None` when no record carries this id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Replace all mutable fields of the addressed record.
    ///
    /// Returns `None` when no record carries this id.
    async fn update(
        &self,
        id: i32,
        record: &NewFeedback,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError>;

    /// Remove the addressed record.
    ///
    /// Returns `false` when no record carries this id.
    async fn delete(&self, id: i32) -> Result<bool, FeedbackRepositoryError>;
}

#[derive(Debug, Default)]
struct FixtureState {
    records: Vec<Feedback>,
    last_id: i32,
}

/// Fixture implementation for testing without a real database.
///
/// Keeps records in memory behind a mutex and mirrors the persistence
/// contract: sequential ids that are never reused, store-assigned
/// `created_at`, full-field replacement on update, and newest-first
/// listing.
#[derive(Debug, Default)]
pub struct FixtureFeedbackRepository {
    state: Mutex<FixtureState>,
}

impl FixtureFeedbackRepository {
    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FeedbackRepository for FixtureFeedbackRepository {
    async fn create(&self, record: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut state = self.lock();
        state.last_id += 1;
        let feedback = Feedback {
            id: state.last_id,
            name: record.name.clone(),
            email: record.email.clone(),
            event_name: record.event_name.clone(),
            division: record.division,
            rating: record.rating,
            comment: record.comment.clone(),
            suggestion: record.suggestion.clone(),
            status: record.status,
            created_at: Utc::now(),
        };
        state.records.push(feedback.clone());
        Ok(feedback)
    }

    async fn list(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut records = self.lock().records.clone();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let state = self.lock();
        Ok(state.records.iter().find(|record| record.id == id).cloned())
    }

    async fn update(
        &self,
        id: i32,
        record: &NewFeedback,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut state = self.lock();
        let Some(stored) = state.records.iter_mut().find(|stored| stored.id == id) else {
            return Ok(None);
        };
        stored.name = record.name.clone();
        stored.email = record.email.clone();
        stored.event_name = record.event_name.clone();
        stored.division = record.division;
        stored.rating = record.rating;
        stored.comment = record.comment.clone();
        stored.suggestion = record.suggestion.clone();
        stored.status = record.status;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, FeedbackRepositoryError> {
        let mut state = self.lock();
        let before = state.records.len();
        state.records.retain(|record| record.id != id);
        Ok(state.records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::{Division, FeedbackStatus};
    use rstest::rstest;

    fn sample_record(name: &str) -> NewFeedback {
        NewFeedback {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            event_name: "Rust Day".to_owned(),
            division: Division::RnD,
            rating: 4,
            comment: None,
            suggestion: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_created_at() {
        let repo = FixtureFeedbackRepository::default();

        let first = repo
            .create(&sample_record("Ada"))
            .await
            .expect("fixture create succeeds");
        let second = repo
            .create(&sample_record("Grace"))
            .await
            .expect("fixture create succeeds");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = FixtureFeedbackRepository::default();
        for name in ["Ada", "Grace", "Edsger"] {
            repo.create(&sample_record(name))
                .await
                .expect("fixture create succeeds");
        }

        let records = repo.list().await.expect("fixture list succeeds");
        let ids: Vec<i32> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn update_replaces_every_mutable_field() {
        let repo = FixtureFeedbackRepository::default();
        let created = repo
            .create(&sample_record("Ada"))
            .await
            .expect("fixture create succeeds");

        let mut replacement = sample_record("Grace");
        replacement.rating = 2;
        replacement.status = Some(FeedbackStatus::InReview);
        let updated = repo
            .update(created.id, &replacement)
            .await
            .expect("fixture update succeeds")
            .expect("record exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Grace");
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.status, Some(FeedbackStatus::InReview));
        assert_eq!(updated.created_at, created.created_at);

        // A later update without a status clears the stored one.
        let cleared = repo
            .update(created.id, &sample_record("Grace"))
            .await
            .expect("fixture update succeeds")
            .expect("record exists");
        assert_eq!(cleared.status, None);
    }

    #[tokio::test]
    async fn update_and_delete_miss_unknown_ids() {
        let repo = FixtureFeedbackRepository::default();

        let updated = repo
            .update(42, &sample_record("Ada"))
            .await
            .expect("fixture update succeeds");
        assert!(updated.is_none());

        let deleted = repo.delete(42).await.expect("fixture delete succeeds");
        assert!(!deleted);
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reused() {
        let repo = FixtureFeedbackRepository::default();
        let first = repo
            .create(&sample_record("Ada"))
            .await
            .expect("fixture create succeeds");
        assert!(
            repo.delete(first.id)
                .await
                .expect("fixture delete succeeds")
        );

        let second = repo
            .create(&sample_record("Grace"))
            .await
            .expect("fixture create succeeds");
        assert_eq!(second.id, first.id + 1);
    }

    #[rstest]
    fn constraint_error_formats_its_message() {
        let error = FeedbackRepositoryError::constraint("Null constraint violation");
        assert_eq!(
            error.to_string(),
            "feedback repository constraint failed: Null constraint violation"
        );
    }
}
