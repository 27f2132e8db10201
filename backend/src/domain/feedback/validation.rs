//! Field validation pipeline for feedback payloads.
//!
//! Each field runs presence, type, bounds, and enum-membership checks in
//! that order; every failure is collected so a payload either normalises
//! completely or reports the full failure set in one response. This rule
//! set is the single authoritative check; clients may mirror it but the
//! server never trusts them to.

use std::fmt;

use serde_json::{Value, json};
use validator::ValidateEmail;

use crate::domain::Error;

use super::{Division, FeedbackDraft, FeedbackStatus, NewFeedback};

const TEXT_MAX: usize = 50;
const RATING_MIN: i32 = 1;
const RATING_MAX: i32 = 5;

/// Which operation a payload is being validated for.
///
/// `Update` additionally accepts `status`; supplying one on `Create` is a
/// field error so the create/update distinction stays observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Create,
    Update,
}

/// Validation error codes reported per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldCode {
    MissingField,
    InvalidType,
    TooShort,
    TooLong,
    InvalidEmail,
    InvalidEnum,
    OutOfRange,
    NotAllowed,
}

impl FieldCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidEnum => "invalid_enum",
            Self::OutOfRange => "out_of_range",
            Self::NotAllowed => "not_allowed",
        }
    }
}

/// One field failure reported by the validation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub code: &'static str,
}

/// The full set of field failures for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>, code: FieldCode) {
        self.0.push(FieldError {
            field,
            message: message.into(),
            code: code.as_str(),
        });
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Collected failures in field-declaration order.
    pub fn errors(&self) -> &[FieldError] {
        self.0.as_slice()
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        let details = errors
            .0
            .iter()
            .map(|error| {
                json!({
                    "field": error.field,
                    "message": error.message,
                    "code": error.code,
                })
            })
            .collect();
        Error::invalid_request("Invalid request body").with_details(Value::Array(details))
    }
}

/// Validate a raw payload for the given operation.
///
/// # Examples
/// ```
/// use feedback_backend::domain::{ValidationKind, validate};
/// use serde_json::json;
///
/// let draft = serde_json::from_value(json!({
///     "name": "Ada",
///     "email": "ada@example.com",
///     "eventName": "Rust Day",
///     "division": "RnD",
///     "rating": "5",
/// }))
/// .expect("draft deserialises");
///
/// let record = validate(ValidationKind::Create, &draft).expect("payload is valid");
/// assert_eq!(record.rating, 5);
/// ```
pub fn validate(kind: ValidationKind, draft: &FeedbackDraft) -> Result<NewFeedback, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = required_text("name", draft.name.as_ref(), &mut errors);
    let email = required_email("email", draft.email.as_ref(), &mut errors);
    let event_name = required_text("eventName", draft.event_name.as_ref(), &mut errors);
    let division = required_division(draft.division.as_ref(), &mut errors);
    let rating = required_rating(draft.rating.as_ref(), &mut errors);
    let comment = optional_text("comment", draft.comment.as_ref(), &mut errors);
    let suggestion = optional_text("suggestion", draft.suggestion.as_ref(), &mut errors);
    let status = optional_status(kind, draft.status.as_ref(), &mut errors);

    match (name, email, event_name, division, rating) {
        (Some(name), Some(email), Some(event_name), Some(division), Some(rating))
            if errors.is_empty() =>
        {
            Ok(NewFeedback {
                name,
                email,
                event_name,
                division,
                rating,
                comment,
                suggestion,
                status,
            })
        }
        _ => Err(errors),
    }
}

/// Presence check; JSON `null` counts as absent.
fn require<'a>(
    field: &'static str,
    value: Option<&'a Value>,
    errors: &mut FieldErrors,
) -> Option<&'a Value> {
    match value {
        Some(value) if !value.is_null() => Some(value),
        _ => {
            errors.push(
                field,
                format!("missing required field: {field}"),
                FieldCode::MissingField,
            );
            None
        }
    }
}

fn string_value<'a>(
    field: &'static str,
    value: &'a Value,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match value.as_str() {
        Some(text) => Some(text),
        None => {
            errors.push(
                field,
                format!("{field} must be a string"),
                FieldCode::InvalidType,
            );
            None
        }
    }
}

fn bounded_text(field: &'static str, text: &str, errors: &mut FieldErrors) -> Option<String> {
    if text.is_empty() {
        errors.push(
            field,
            format!("{field} must not be empty"),
            FieldCode::TooShort,
        );
        return None;
    }
    if text.chars().count() > TEXT_MAX {
        errors.push(
            field,
            format!("{field} must be at most {TEXT_MAX} characters"),
            FieldCode::TooLong,
        );
        return None;
    }
    Some(text.to_owned())
}

fn required_text(
    field: &'static str,
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = require(field, value, errors)?;
    let text = string_value(field, value, errors)?;
    bounded_text(field, text, errors)
}

fn required_email(
    field: &'static str,
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let email = required_text(field, value, errors)?;
    if !email.validate_email() {
        errors.push(
            field,
            format!("{field} must be a valid email address"),
            FieldCode::InvalidEmail,
        );
        return None;
    }
    Some(email)
}

fn required_division(value: Option<&Value>, errors: &mut FieldErrors) -> Option<Division> {
    const FIELD: &str = "division";
    let value = require(FIELD, value, errors)?;
    let text = string_value(FIELD, value, errors)?;
    match text.parse::<Division>() {
        Ok(division) => Some(division),
        Err(_) => {
            errors.push(
                FIELD,
                format!("{FIELD} must be one of {}", members(&Division::ALL)),
                FieldCode::InvalidEnum,
            );
            None
        }
    }
}

/// Coerce a JSON integer, integral float, or numeric string to `i64`.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .and_then(|float| i64::try_from(float as i128).ok())
        }),
        Value::String(raw) => {
            let raw = raw.trim();
            raw.parse::<i64>().ok().or_else(|| {
                raw.parse::<f64>()
                    .ok()
                    .filter(|float| float.is_finite() && float.fract() == 0.0)
                    .and_then(|float| i64::try_from(float as i128).ok())
            })
        }
        _ => None,
    }
}

fn required_rating(value: Option<&Value>, errors: &mut FieldErrors) -> Option<i32> {
    const FIELD: &str = "rating";
    let value = require(FIELD, value, errors)?;
    match coerce_integer(value) {
        Some(raw) => match i32::try_from(raw) {
            Ok(rating) if (RATING_MIN..=RATING_MAX).contains(&rating) => Some(rating),
            _ => {
                errors.push(
                    FIELD,
                    format!("{FIELD} must be between {RATING_MIN} and {RATING_MAX}"),
                    FieldCode::OutOfRange,
                );
                None
            }
        },
        None => {
            errors.push(
                FIELD,
                format!("{FIELD} must be an integer"),
                FieldCode::InvalidType,
            );
            None
        }
    }
}

fn optional_text(
    field: &'static str,
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = value.filter(|value| !value.is_null())?;
    string_value(field, value, errors).map(ToOwned::to_owned)
}

fn optional_status(
    kind: ValidationKind,
    value: Option<&Value>,
    errors: &mut FieldErrors,
) -> Option<FeedbackStatus> {
    const FIELD: &str = "status";
    let value = value.filter(|value| !value.is_null())?;
    if kind == ValidationKind::Create {
        errors.push(
            FIELD,
            format!("{FIELD} cannot be set when creating feedback"),
            FieldCode::NotAllowed,
        );
        return None;
    }
    let text = string_value(FIELD, value, errors)?;
    match text.parse::<FeedbackStatus>() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(
                FIELD,
                format!("{FIELD} must be one of {}", members(&FeedbackStatus::ALL)),
                FieldCode::InvalidEnum,
            );
            None
        }
    }
}

fn members<T: fmt::Display>(members: &[T]) -> String {
    members
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
