//! Database migration command.
//!
//! Migrations are embedded from `crates/server/migrations/` at compile time;
//! the server never runs them on startup, this command is the only path.

use tracing::info;

use ratestore_server::db;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the environment is missing `RATESTORE_DATABASE_URL`
/// or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
