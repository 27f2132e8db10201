//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::feedback::NewFeedback;

use super::schema::feedback;

/// Row struct for reading from the feedback table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedback)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub event_name: String,
    pub division: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub suggestion: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new feedback records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedback)]
pub(crate) struct NewFeedbackRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub event_name: &'a str,
    pub division: &'a str,
    pub rating: i32,
    pub comment: Option<&'a str>,
    pub suggestion: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Changeset struct for replacing the mutable fields of a record.
///
/// `treat_none_as_null` makes the update a full replace: an absent optional
/// field writes NULL rather than leaving the stored value untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = feedback)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct FeedbackChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub event_name: &'a str,
    pub division: &'a str,
    pub rating: i32,
    pub comment: Option<&'a str>,
    pub suggestion: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl<'a> From<&'a NewFeedback> for NewFeedbackRow<'a> {
    fn from(record: &'a NewFeedback) -> Self {
        Self {
            name: &record.name,
            email: &record.email,
            event_name: &record.event_name,
            division: record.division.as_str(),
            rating: record.rating,
            comment: record.comment.as_deref(),
            suggestion: record.suggestion.as_deref(),
            status: record.status.map(|status| status.as_str()),
        }
    }
}

impl<'a> From<&'a NewFeedback> for FeedbackChangeset<'a> {
    fn from(record: &'a NewFeedback) -> Self {
        Self {
            name: &record.name,
            email: &record.email,
            event_name: &record.event_name,
            division: record.division.as_str(),
            rating: record.rating,
            comment: record.comment.as_deref(),
            suggestion: record.suggestion.as_deref(),
            status: record.status.map(|status| status.as_str()),
        }
    }
}
