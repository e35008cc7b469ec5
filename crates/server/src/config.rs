//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RATESTORE_DATABASE_URL` - `SQLite` connection string
//!   (e.g. `sqlite://ratestore.db?mode=rwc`)
//!
//! ## Optional
//! - `RATESTORE_HOST` - Bind address (default: 127.0.0.1)
//! - `RATESTORE_PORT` - Listen port (default: 3000)
//! - `RATESTORE_JWT_SECRET` - Session token signing secret. Falls back to a
//!   fixed development value with a warning when unset; set it in any real
//!   deployment.
//! - `RATESTORE_TOKEN_TTL_DAYS` - Session token lifetime in days (default: 7)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Fallback signing secret used when `RATESTORE_JWT_SECRET` is unset.
///
/// Kept stable across releases so tokens issued by an unconfigured process
/// survive a restart. Any process started without an explicit secret logs a
/// warning.
const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Default session token lifetime in days.
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL.
    pub database_url: SecretString,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Session token signing secret.
    pub jwt_secret: SecretString,
    /// Session token lifetime in days.
    pub token_ttl_days: i64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_env("RATESTORE_DATABASE_URL").map(SecretString::from)?;
        let host = get_env_or_default("RATESTORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RATESTORE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RATESTORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RATESTORE_PORT".to_string(), e.to_string()))?;
        let jwt_secret = get_jwt_secret();
        let token_ttl_days = get_env_or_default(
            "RATESTORE_TOKEN_TTL_DAYS",
            &DEFAULT_TOKEN_TTL_DAYS.to_string(),
        )
        .parse::<i64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("RATESTORE_TOKEN_TTL_DAYS".to_string(), e.to_string())
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            token_ttl_days,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Read the signing secret, falling back to the fixed default.
fn get_jwt_secret() -> SecretString {
    match std::env::var("RATESTORE_JWT_SECRET") {
        Ok(value) if !value.is_empty() => SecretString::from(value),
        _ => {
            tracing::warn!(
                "RATESTORE_JWT_SECRET is not set; using the insecure built-in default. \
                 Set it before deploying."
            );
            SecretString::from(DEFAULT_JWT_SECRET)
        }
    }
}

fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    /// Configuration suitable for tests: in-memory database and a throwaway
    /// signing secret.
    impl AppConfig {
        #[must_use]
        pub fn for_tests() -> Self {
            Self {
                database_url: SecretString::from("sqlite::memory:"),
                host: IpAddr::from([127, 0, 0, 1]),
                port: 0,
                jwt_secret: SecretString::from("test-signing-secret-not-for-production"),
                token_ttl_days: 7,
            }
        }
    }

    #[test]
    fn default_secret_is_the_documented_fallback() {
        // The fallback must stay stable: tokens signed before a restart with
        // no configured secret must still verify after it.
        assert_eq!(DEFAULT_JWT_SECRET, "your-secret-key-change-in-production");
    }

    #[test]
    fn test_config_binds_loopback() {
        let config = AppConfig::for_tests();
        assert!(config.socket_addr().ip().is_loopback());
        assert_eq!(config.database_url.expose_secret(), "sqlite::memory:");
    }
}
