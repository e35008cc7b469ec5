//! Rating submission route.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use ratestore_core::{RatingValue, StoreId};

use crate::db::{ratings::RatingRepository, stores::StoreRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireSession;
use crate::models::RatingResponse;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingPayload {
    store_id: Option<String>,
    value: Option<i64>,
}

/// `POST /api/ratings`
///
/// Upserts the caller's rating for a store: rating the same store again
/// replaces the value in place, it never creates a second row.
pub async fn submit(
    State(state): State<AppState>,
    RequireSession(session): RequireSession,
    Json(payload): Json<SubmitRatingPayload>,
) -> Result<(StatusCode, Json<Value>)> {
    let store_id = payload
        .store_id
        .ok_or_else(|| AppError::Validation("Store ID and rating are required".to_string()))?;
    let value = payload
        .value
        .ok_or_else(|| AppError::Validation("Store ID and rating are required".to_string()))?;

    let value = RatingValue::new(value)
        .map_err(|_| AppError::Validation("Rating must be between 1 and 5".to_string()))?;

    let store_id = StoreId::parse(&store_id)
        .map_err(|_| AppError::NotFound("Store not found".to_string()))?;

    let stores = StoreRepository::new(state.pool());
    if !stores.exists(store_id).await? {
        return Err(AppError::NotFound("Store not found".to_string()));
    }

    let rating = RatingRepository::new(state.pool())
        .upsert(session.user_id, store_id, value)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Rating submitted successfully",
            "rating": RatingResponse::from(rating),
        })),
    ))
}
