//! Admin routes: user and store management plus platform statistics.
//!
//! Every handler here takes [`RequireAdmin`]; the role model is flat, so a
//! store owner is as forbidden as a normal user.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use ratestore_core::{Email, Role};

use crate::db::{
    ratings::RatingRepository, stores::StoreRepository, users::UserRepository,
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{
    NewStore, StoreResponse, StoreWithOwnerResponse, StoreWithStats, UserResponse,
    UserWithStoreResponse,
};
use crate::services::auth::{self, AuthService};
use crate::services::ratings::round2;
use crate::state::AppState;

fn required(field: Option<String>) -> Result<String> {
    field.ok_or_else(|| AppError::Validation("All fields are required".to_string()))
}

/// `GET /api/admin/users`
///
/// All accounts, newest first, each with their store if they own one.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Value>> {
    let users = UserRepository::new(state.pool()).list_with_store().await?;
    let users: Vec<UserWithStoreResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "users": users })))
}

#[derive(Deserialize)]
pub struct CreateUserPayload {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    address: Option<String>,
    role: Option<String>,
}

/// `POST /api/admin/users`
///
/// Creates an account with any of the three roles.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(payload): Json<CreateUserPayload>,
) -> Result<Json<Value>> {
    let name = required(payload.name)?;
    let email = required(payload.email)?;
    let password = required(payload.password)?;
    let address = required(payload.address)?;
    let role = required(payload.role)?
        .parse::<Role>()
        .map_err(|_| AppError::Validation("Invalid role".to_string()))?;

    let user = AuthService::new(state.pool())
        .create_user(&name, &email, &password, &address, role)
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "Admin created account");

    Ok(Json(json!({
        "message": "User created successfully",
        "user": UserResponse::from(user),
    })))
}

/// `GET /api/admin/stores`
///
/// All stores with their owner accounts and rating aggregates.
pub async fn list_stores(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Value>> {
    let stores = StoreRepository::new(state.pool()).list_with_owners().await?;
    let stores: Vec<StoreWithOwnerResponse> = stores.into_iter().map(Into::into).collect();

    Ok(Json(json!({ "stores": stores })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    owner_name: Option<String>,
    owner_email: Option<String>,
    owner_password: Option<String>,
    owner_address: Option<String>,
    store_name: Option<String>,
    store_email: Option<String>,
    store_address: Option<String>,
}

/// `POST /api/admin/stores`
///
/// Atomically creates a `STORE_OWNER` account and their store. A duplicate
/// owner or store email leaves no partial rows behind.
pub async fn create_store(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(payload): Json<CreateStorePayload>,
) -> Result<Json<Value>> {
    let owner_name = required(payload.owner_name)?;
    let owner_email = required(payload.owner_email)?;
    let owner_password = required(payload.owner_password)?;
    let owner_address = required(payload.owner_address)?;
    let store_name = required(payload.store_name)?;
    let store_email = required(payload.store_email)?;
    let store_address = required(payload.store_address)?;

    let owner = auth::prepare_new_user(
        &owner_name,
        &owner_email,
        &owner_password,
        &owner_address,
        Role::StoreOwner,
    )?;

    auth::validate_address(&store_address)?;
    let store = NewStore {
        name: store_name,
        email: Email::parse(&store_email)
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?,
        address: store_address,
    };

    let (owner, store) = StoreRepository::new(state.pool())
        .create_with_owner(&owner, &store)
        .await?;

    tracing::info!(store_id = %store.id, owner_id = %owner.id, "Admin created store");

    let response = StoreResponse::from(StoreWithStats {
        store,
        rating_count: 0,
        average_rating: None,
    });

    Ok(Json(json!({
        "message": "Store and owner created successfully",
        "store": response,
        "owner": UserResponse::from(owner),
    })))
}

/// `GET /api/admin/stats`
///
/// Platform totals. The platform-wide average is reported as `0` when there
/// are no ratings at all, unlike the per-store average which is absent.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Value>> {
    let total_users = UserRepository::new(state.pool()).count().await?;
    let total_stores = StoreRepository::new(state.pool()).count().await?;
    let totals = RatingRepository::new(state.pool()).totals().await?;

    let average_rating = totals.average.map_or(0.0, round2);

    Ok(Json(json!({
        "stats": {
            "totalUsers": total_users,
            "totalStores": total_stores,
            "totalRatings": totals.count,
            "averageRating": average_rating,
        }
    })))
}
