//! PostgreSQL-backed `FeedbackRepository` implementation using Diesel ORM.
//!
//! This adapter implements the domain's `FeedbackRepository` port. Database
//! failures are translated through a fixed table into repository errors
//! carrying client-safe phrases; the raw Diesel diagnostics are logged and
//! never propagated.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::feedback::{Division, Feedback, FeedbackStatus, NewFeedback};
use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};

use super::models::{FeedbackChangeset, FeedbackRow, NewFeedbackRow};
use super::pool::{DbPool, PoolError};
use super::schema::feedback;

/// Diesel-backed implementation of the `FeedbackRepository` port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to feedback repository errors.
fn map_pool_error(error: PoolError) -> FeedbackRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            FeedbackRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to feedback repository errors.
///
/// The messages on constraint-shaped variants are the phrases clients see;
/// anything unrecognised collapses to a generic query failure.
fn map_diesel_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            FeedbackRepositoryError::duplicate("Unique constraint violation")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            FeedbackRepositoryError::constraint("Foreign key violation")
        }
        DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => {
            FeedbackRepositoryError::constraint("Null constraint violation")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            FeedbackRepositoryError::constraint("Constraint failed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FeedbackRepositoryError::connection("database connection error")
        }
        _ => FeedbackRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain feedback record.
///
/// Stored enum columns are guarded by check constraints; a value that still
/// fails to parse indicates schema drift and surfaces as a query error.
fn row_to_feedback(row: FeedbackRow) -> Result<Feedback, FeedbackRepositoryError> {
    let division = row.division.parse::<Division>().map_err(|_| {
        warn!(id = row.id, value = %row.division, "unrecognised stored division value");
        FeedbackRepositoryError::query("stored division value is not recognised")
    })?;
    let status = row
        .status
        .as_deref()
        .map(|raw| {
            raw.parse::<FeedbackStatus>().map_err(|_| {
                warn!(id = row.id, value = raw, "unrecognised stored status value");
                FeedbackRepositoryError::query("stored status value is not recognised")
            })
        })
        .transpose()?;

    Ok(Feedback {
        id: row.id,
        name: row.name,
        email: row.email,
        event_name: row.event_name,
        division,
        rating: row.rating,
        comment: row.comment,
        suggestion: row.suggestion,
        status,
        created_at: row.created_at,
    })
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn create(&self, record: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: FeedbackRow = diesel::insert_into(feedback::table)
            .values(NewFeedbackRow::from(record))
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_feedback(row)
    }

    async fn list(&self) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<FeedbackRow> = feedback::table
            .order((feedback::created_at.desc(), feedback::id.desc()))
            .select(FeedbackRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_feedback).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeedbackRow> = feedback::table
            .find(id)
            .select(FeedbackRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }

    async fn update(
        &self,
        id: i32,
        record: &NewFeedback,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeedbackRow> = diesel::update(feedback::table.find(id))
            .set(FeedbackChangeset::from(record))
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_feedback).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(feedback::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the error translation table and row
    //! conversion.
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("raw database text".to_owned()))
    }

    fn sample_row() -> FeedbackRow {
        FeedbackRow {
            id: 1,
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            event_name: "Rust Day".to_owned(),
            division: "LnT".to_owned(),
            rating: 5,
            comment: None,
            suggestion: Some("More snacks".to_owned()),
            status: Some("in-review".to_owned()),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            FeedbackRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let repo_err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation));

        assert_eq!(
            repo_err,
            FeedbackRepositoryError::duplicate("Unique constraint violation")
        );
    }

    #[rstest]
    #[case(DatabaseErrorKind::ForeignKeyViolation, "Foreign key violation")]
    #[case(DatabaseErrorKind::NotNullViolation, "Null constraint violation")]
    #[case(DatabaseErrorKind::CheckViolation, "Constraint failed")]
    fn integrity_violations_map_to_constraint(
        #[case] kind: DatabaseErrorKind,
        #[case] expected_message: &str,
    ) {
        let repo_err = map_diesel_error(database_error(kind));

        assert_eq!(
            repo_err,
            FeedbackRepositoryError::constraint(expected_message)
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let repo_err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection));

        assert!(matches!(
            repo_err,
            FeedbackRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn unrecognised_errors_collapse_to_query_error() {
        for error in [
            DieselError::NotFound,
            database_error(DatabaseErrorKind::SerializationFailure),
        ] {
            let repo_err = map_diesel_error(error);
            assert!(matches!(repo_err, FeedbackRepositoryError::Query { .. }));
        }
    }

    #[rstest]
    fn translated_messages_never_carry_raw_database_text() {
        for kind in [
            DatabaseErrorKind::UniqueViolation,
            DatabaseErrorKind::ForeignKeyViolation,
            DatabaseErrorKind::NotNullViolation,
            DatabaseErrorKind::CheckViolation,
            DatabaseErrorKind::ClosedConnection,
            DatabaseErrorKind::SerializationFailure,
        ] {
            let repo_err = map_diesel_error(database_error(kind));
            assert!(!repo_err.to_string().contains("raw database text"));
        }
    }

    #[rstest]
    fn row_converts_to_domain_feedback() {
        let feedback = row_to_feedback(sample_row()).expect("row converts");

        assert_eq!(feedback.division, Division::LnT);
        assert_eq!(feedback.status, Some(FeedbackStatus::InReview));
        assert_eq!(feedback.suggestion.as_deref(), Some("More snacks"));
    }

    #[rstest]
    fn corrupt_division_surfaces_as_query_error() {
        let mut row = sample_row();
        row.division = "Finance".to_owned();

        let result = row_to_feedback(row);
        assert!(matches!(
            result,
            Err(FeedbackRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn corrupt_status_surfaces_as_query_error() {
        let mut row = sample_row();
        row.status = Some("closed".to_owned());

        let result = row_to_feedback(row);
        assert!(matches!(
            result,
            Err(FeedbackRepositoryError::Query { .. })
        ));
    }
}
