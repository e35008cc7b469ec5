//! Authentication routes: signup, login, logout, current user, password
//! change.
//!
//! Request payloads use `Option` fields so a missing field is reported as a
//! 400 with a stable message rather than a body-deserialization rejection.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::{RequireSession, SESSION_COOKIE};
use crate::models::UserResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

fn required(field: Option<String>) -> Result<String> {
    field.ok_or_else(|| AppError::Validation("All fields are required".to_string()))
}

#[derive(Deserialize)]
pub struct SignupPayload {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    address: Option<String>,
}

/// `POST /api/auth/signup`
///
/// Self-registration. The created account is always `NORMAL_USER`; the
/// payload carries no role field and any extra fields are ignored.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let name = required(payload.name)?;
    let email = required(payload.email)?;
    let password = required(payload.password)?;
    let address = required(payload.address)?;

    let user = AuthService::new(state.pool())
        .signup(&name, &email, &password, &address)
        .await?;

    tracing::info!(user_id = %user.id, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": UserResponse::from(user),
        })),
    ))
}

#[derive(Deserialize)]
pub struct LoginPayload {
    email: Option<String>,
    password: Option<String>,
}

/// `POST /api/auth/login`
///
/// On success, sets the `token` session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<(CookieJar, Json<Value>)> {
    let email = required(payload.email)?;
    let password = required(payload.password)?;

    let user = AuthService::new(state.pool())
        .verify_credentials(&email, &password)
        .await?;

    let token = state.tokens().issue(user.id, user.role)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(state.config().token_ttl_days))
        .build();

    tracing::info!(user_id = %user.id, "Login");

    Ok((
        jar.add(cookie),
        Json(json!({
            "message": "Login successful",
            "user": UserResponse::from(user),
        })),
    ))
}

/// `POST /api/auth/logout`
///
/// Clears the session cookie. Always succeeds, even without a session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        Json(json!({ "message": "Logged out successfully" })),
    )
}

/// `GET /api/auth/me`
///
/// The account behind the current session. A verified token whose account
/// has since disappeared is treated as an invalid session, not a missing
/// resource.
pub async fn me(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
) -> Result<Json<Value>> {
    let user = AuthService::new(state.pool()).get_user(session.user_id).await?;

    Ok(Json(json!({ "user": UserResponse::from(user) })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    current_password: Option<String>,
    new_password: Option<String>,
}

/// `POST /api/auth/change-password`
pub async fn change_password(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<Value>> {
    let current = required(payload.current_password)?;
    let new = required(payload.new_password)?;

    AuthService::new(state.pool())
        .change_password(session.user_id, &current, &new)
        .await?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
