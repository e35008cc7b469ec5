//! Store-owner dashboard route.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::db::{ratings::RatingRepository, stores::StoreRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireStoreOwner;
use crate::models::{OwnerDashboard, OwnerDashboardResponse};
use crate::state::AppState;

/// How many recent ratings the dashboard shows.
const RECENT_RATINGS: i64 = 10;

/// `GET /api/store/info`
///
/// The caller's own store with rating aggregates and the most recent
/// ratings, each annotated with the rater's name.
pub async fn info(
    State(state): State<AppState>,
    RequireStoreOwner(session): RequireStoreOwner,
) -> Result<Json<Value>> {
    let entry = StoreRepository::new(state.pool())
        .get_by_owner(session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

    let recent_ratings = RatingRepository::new(state.pool())
        .recent_for_store(entry.store.id, RECENT_RATINGS)
        .await?;

    let dashboard = OwnerDashboard {
        store: entry.store,
        rating_count: entry.rating_count,
        average_rating: entry.average_rating,
        recent_ratings,
    };

    Ok(Json(json!({ "store": OwnerDashboardResponse::from(dashboard) })))
}
