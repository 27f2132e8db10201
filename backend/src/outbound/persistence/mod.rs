//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the feedback
//! repository port backed by PostgreSQL via the Diesel ORM with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel models
//!   and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed to
//!   the domain layer.
//! - **Strongly typed errors**: every database failure is mapped to a
//!   repository error carrying a client-safe message; raw database text
//!   only ever reaches the logs.

mod diesel_feedback_repository;
mod models;
mod pool;
mod schema;

pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations bundled into the binary at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying pending migrations at startup.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection to run migrations against.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Execution { message: String },
}

/// Apply all pending migrations on a blocking connection.
///
/// Runs before the async pool is constructed so the server never accepts
/// traffic against an out-of-date schema.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn =
        diesel::PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Execution {
            message: err.to_string(),
        })?;
    Ok(())
}
