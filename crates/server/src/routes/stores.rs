//! Public store routes: listing and per-store detail.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use ratestore_core::StoreId;

use crate::db::{ratings::RatingRepository, stores::StoreRepository};
use crate::error::{AppError, Result};
use crate::middleware::OptionalSession;
use crate::models::{StoreDetailResponse, StoreResponse};
use crate::state::AppState;

/// `GET /api/stores`
///
/// All stores with rating count and rounded average. A store with no
/// ratings reports its average as `null`.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let stores = StoreRepository::new(state.pool()).list_with_stats().await?;
    let stores: Vec<StoreResponse> = stores.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "stores": stores })))
}

/// `GET /api/stores/{id}`
///
/// One store's detail. When the caller holds a valid session, the response
/// includes their own rating for this store.
pub async fn detail(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    // An unparseable ID can't name any store.
    let store_id = StoreId::parse(&id)
        .map_err(|_| AppError::NotFound("Store not found".to_string()))?;

    let mut detail = StoreRepository::new(state.pool())
        .get_detail(store_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

    if let Some(session) = session {
        detail.user_rating = RatingRepository::new(state.pool())
            .get_value(session.user_id, store_id)
            .await?;
    }

    Ok(Json(json!({ "store": StoreDetailResponse::from(detail) })))
}
