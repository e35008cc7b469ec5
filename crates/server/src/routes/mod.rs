//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod owner;
pub mod profile;
pub mod ratings;
pub mod stores;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with all routes configured.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/change-password", post(auth::change_password))
        .route("/api/profile", put(profile::update))
        .route("/api/stores", get(stores::list))
        .route("/api/stores/{id}", get(stores::detail))
        .route("/api/ratings", post(ratings::submit))
        .route("/api/store/info", get(owner::info))
        .route(
            "/api/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/api/admin/stores",
            get(admin::list_stores).post(admin::create_store),
        )
        .route("/api/admin/stats", get(admin::stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe; checks database connectivity.
async fn ready(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok(Json(json!({ "status": "ready" })))
}
