//! Authentication service errors.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors from account and credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately one variant for both,
    /// so the HTTP layer cannot leak which part was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The current password supplied to a password change did not match.
    #[error("current password is incorrect")]
    BadCurrentPassword,

    /// A verified session points at an account that no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// The email is already registered.
    #[error("email already taken")]
    EmailTaken,

    /// Input failed a validation rule.
    #[error("{0}")]
    Validation(String),

    /// Password hashing or verification failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying database error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
