//! Shared application state.

use std::sync::Arc;

use chrono::Duration;
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::services::token::TokenService;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    tokens: TokenService,
}

impl AppState {
    /// Build the state from configuration and a connected pool.
    #[must_use]
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, Duration::days(config.token_ttl_days));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
