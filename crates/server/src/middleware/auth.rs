//! Session extractors for route handlers.
//!
//! Role gates are flat: each extractor admits exactly the role it names, with
//! no hierarchy. An admin hitting a store-owner route gets 403 like anyone
//! else.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use ratestore_core::{Role, UserId};

use super::SESSION_COOKIE;
use crate::error::AppError;
use crate::state::AppState;

/// A verified session: who is calling, and as what role.
///
/// The role is read from the token claims, not the database, so a role
/// change takes effect on the next login.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_id: UserId,
    pub role: Role,
}

fn session_from_parts(parts: &Parts, state: &AppState) -> Result<Session, AppError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()))?;

    let claims = state.tokens().verify(cookie.value())?;

    Ok(Session {
        user_id: claims.sub,
        role: claims.role,
    })
}

/// Requires a valid session of any role.
pub struct RequireSession(pub Session);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state).map(Self)
    }
}

/// Extracts the session if one is present and valid; never rejects.
///
/// Used by routes that render differently for authenticated callers, such as
/// the store detail view with the caller's own rating.
pub struct OptionalSession(pub Option<Session>);

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_parts(parts, state).ok()))
    }
}

/// Requires a session with the `SYSTEM_ADMIN` role.
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state)?;
        match session.role {
            Role::SystemAdmin => Ok(Self(session)),
            Role::NormalUser | Role::StoreOwner => Err(AppError::Forbidden),
        }
    }
}

/// Requires a session with the `STORE_OWNER` role.
pub struct RequireStoreOwner(pub Session);

impl FromRequestParts<AppState> for RequireStoreOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state)?;
        match session.role {
            Role::StoreOwner => Ok(Self(session)),
            Role::NormalUser | Role::SystemAdmin => Err(AppError::Forbidden),
        }
    }
}
