//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Event feedback submissions.
    ///
    /// One row per submitted form. The `id` column is a serial primary key;
    /// `created_at` defaults to the insertion instant.
    feedback (id) {
        /// Primary key: store-assigned serial.
        id -> Int4,
        /// Submitter's name (max 50 characters).
        #[max_length = 50]
        name -> Varchar,
        /// Submitter's email address (max 50 characters).
        #[max_length = 50]
        email -> Varchar,
        /// Name of the rated event (max 50 characters).
        #[max_length = 50]
        event_name -> Varchar,
        /// Division that ran the event (`LnT`, `EEO`, `PR`, `HRD`, `RnD`).
        #[max_length = 8]
        division -> Varchar,
        /// Star rating, constrained to 1..=5.
        rating -> Int4,
        /// Optional free-text comment.
        comment -> Nullable<Text>,
        /// Optional free-text suggestion.
        suggestion -> Nullable<Text>,
        /// Optional triage status (`open`, `in-review`, `resolved`).
        #[max_length = 16]
        status -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
