//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Read `RATESTORE_DATABASE_URL` from the environment (or `.env`).
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("RATESTORE_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "RATESTORE_DATABASE_URL not set".into())
}
