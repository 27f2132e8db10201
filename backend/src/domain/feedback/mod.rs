//! Feedback records and their validation rules.
//!
//! A feedback record captures one attendee's rating of an event, together
//! with the organisational division that ran it and optional free-text
//! remarks. Records are created through the validation pipeline in
//! [`validation`]; adapters never construct a [`NewFeedback`] by hand from
//! unchecked input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

mod validation;


pub use validation::{FieldError, FieldErrors, ValidationKind, validate};

/// Organisational divisions that run events.
///
/// Serialised forms match the stored and wire values exactly (`"LnT"`,
/// `"EEO"`, `"PR"`, `"HRD"`, `"RnD"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Division {
    LnT,
    EEO,
    PR,
    HRD,
    RnD,
}

/// Error returned when parsing a division from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseDivisionError;

impl Division {
    /// All divisions in declaration order.
    pub const ALL: [Self; 5] = [Self::LnT, Self::EEO, Self::PR, Self::HRD, Self::RnD];

    /// Stable string form used on the wire and in the store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LnT => "LnT",
            Self::EEO => "EEO",
            Self::PR => "PR",
            Self::HRD => "HRD",
            Self::RnD => "RnD",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseDivisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid division")
    }
}

impl std::error::Error for ParseDivisionError {}

impl FromStr for Division {
    type Err = ParseDivisionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "LnT" => Ok(Self::LnT),
            "EEO" => Ok(Self::EEO),
            "PR" => Ok(Self::PR),
            "HRD" => Ok(Self::HRD),
            "RnD" => Ok(Self::RnD),
            _ => Err(ParseDivisionError),
        }
    }
}

/// Triage states a feedback record moves through on the dashboard.
///
/// Serialised forms are kebab-case (`"open"`, `"in-review"`, `"resolved"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackStatus {
    Open,
    InReview,
    Resolved,
}

/// Error returned when parsing a feedback status from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFeedbackStatusError;

impl FeedbackStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InReview, Self::Resolved];

    /// Stable string form used on the wire and in the store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InReview => "in-review",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParseFeedbackStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid feedback status")
    }
}

impl std::error::Error for ParseFeedbackStatusError {}

impl FromStr for FeedbackStatus {
    type Err = ParseFeedbackStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "in-review" => Ok(Self::InReview),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseFeedbackStatusError),
        }
    }
}

/// A stored feedback record.
///
/// ## Invariants
/// - `id` is assigned by the store and never reused or mutated.
/// - `rating` lies within `1..=5`.
/// - `created_at` is assigned by the store at insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub event_name: String,
    pub division: Division,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeedbackStatus>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// A validated feedback payload ready for persistence.
///
/// Produced exclusively by [`validate`]; holds exactly the mutable fields of
/// a record, already normalised (rating coerced to an integer, enums parsed).
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub event_name: String,
    pub division: Division,
    pub rating: i32,
    pub comment: Option<String>,
    pub suggestion: Option<String>,
    pub status: Option<FeedbackStatus>,
}

/// Raw, untrusted request payload for create and update operations.
///
/// Every field is captured as a bare JSON value so the validation pipeline
/// can report presence, type, bounds, and enum-membership failures for all
/// fields in one pass. Unknown keys are dropped at deserialisation. The
/// schema annotations document the types validation will accept.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    pub email: Option<Value>,
    #[schema(value_type = Option<String>, example = "Launch Day")]
    pub event_name: Option<Value>,
    #[schema(value_type = Option<String>, example = "PR")]
    pub division: Option<Value>,
    #[schema(value_type = Option<i32>, example = 4)]
    pub rating: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub comment: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub suggestion: Option<Value>,
    #[schema(value_type = Option<String>, example = "in-review")]
    pub status: Option<Value>,
}
