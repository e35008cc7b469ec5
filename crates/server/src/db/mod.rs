//! Database operations.
//!
//! # Tables
//!
//! - `users` - Accounts for all three roles
//! - `stores` - Stores, each owned by exactly one `STORE_OWNER` account
//! - `ratings` - Per-(user, store) ratings, upserted in place
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p ratestore-cli -- migrate
//! ```

pub mod ratings;
pub mod stores;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use thiserror::Error;

/// Embedded migrations, shared with the CLI.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors returned by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// The referenced row does not exist.
    #[error("not found")]
    NotFound,

    /// A stored value could not be interpreted as its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to `Conflict(message)`, passing
    /// other errors through as `Database`.
    pub(crate) fn from_unique_violation(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
