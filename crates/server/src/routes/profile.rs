//! Profile route: name/address updates for the current account.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::middleware::RequireSession;
use crate::models::UserResponse;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateProfilePayload {
    name: Option<String>,
    address: Option<String>,
}

/// `PUT /api/profile`
///
/// Updates name and address only; email and role are immutable here.
pub async fn update(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<Value>> {
    let name = payload
        .name
        .ok_or_else(|| AppError::Validation("All fields are required".to_string()))?;
    let address = payload
        .address
        .ok_or_else(|| AppError::Validation("All fields are required".to_string()))?;

    let user = AuthService::new(state.pool())
        .update_profile(session.user_id, &name, &address)
        .await?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": UserResponse::from(user),
    })))
}
