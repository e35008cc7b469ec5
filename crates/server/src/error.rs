//! Unified error handling.
//!
//! Provides a unified `AppError` type covering the full failure taxonomy:
//! validation (400), unauthenticated (401), forbidden (403), not found (404),
//! conflict (409), and internal/database (500). All route handlers return
//! `Result<T, AppError>`; errors render as JSON bodies `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::token::TokenError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session or an invalid session.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Valid session, wrong role.
    #[error("Forbidden")]
    Forbidden,

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate unique field.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors; everything else is the caller's problem.
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients.
        let message = match &self {
            Self::Validation(msg) | Self::Unauthenticated(msg) => msg.clone(),
            Self::Forbidden => "Forbidden".to_string(),
            Self::NotFound(msg) => msg.clone(),
            Self::Conflict(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::NotFound => Self::NotFound("Resource not found".to_string()),
            other => Self::Database(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // One generic message for both unknown email and wrong password,
            // so callers cannot enumerate accounts.
            AuthError::InvalidCredentials => {
                Self::Unauthenticated("Invalid email or password".to_string())
            }
            AuthError::BadCurrentPassword => {
                Self::Unauthenticated("Current password is incorrect".to_string())
            }
            // A verified token pointing at a deleted account is a stale
            // session, not a resource lookup.
            AuthError::UserNotFound => Self::Unauthenticated("Not authenticated".to_string()),
            AuthError::EmailTaken => {
                Self::Conflict("User with this email already exists".to_string())
            }
            AuthError::Validation(msg) => Self::Validation(msg),
            AuthError::PasswordHash => Self::Internal("password hashing failed".to_string()),
            AuthError::Repository(repo) => Self::from(repo),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::Unauthenticated("Session expired".to_string()),
            TokenError::Invalid | TokenError::Signing => {
                Self::Unauthenticated("Invalid token".to_string())
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
