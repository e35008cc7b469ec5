//! Store domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ratestore_core::{Email, StoreId, UserId};

use super::rating::RatingWithRaterResponse;
use super::user::UserResponse;

/// A store (domain type).
#[derive(Debug, Clone)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Store name.
    pub name: String,
    /// Contact email, unique across all stores.
    pub email: Email,
    /// Store address.
    pub address: String,
    /// The owning `STORE_OWNER` account.
    pub owner_id: UserId,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a store.
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub email: Email,
    pub address: String,
}

/// A store annotated with rating aggregates (public listing).
///
/// `average_rating` is `None` for a store with no ratings ("unavailable"),
/// never zero.
#[derive(Debug, Clone)]
pub struct StoreWithStats {
    pub store: Store,
    pub rating_count: i64,
    pub average_rating: Option<f64>,
}

/// A store with its owner and rating aggregates (admin listing).
#[derive(Debug, Clone)]
pub struct StoreWithOwner {
    pub store: Store,
    pub owner: super::User,
    pub rating_count: i64,
    pub average_rating: Option<f64>,
}

/// A single store's detail view, augmented per-caller.
#[derive(Debug, Clone)]
pub struct StoreDetail {
    pub store: Store,
    pub owner_name: String,
    pub rating_count: i64,
    pub average_rating: Option<f64>,
    /// The caller's own rating, when authenticated and present. This is a
    /// view augmentation, not a stored field.
    pub user_rating: Option<i64>,
}

/// The store-owner dashboard: own store plus recent ratings.
#[derive(Debug, Clone)]
pub struct OwnerDashboard {
    pub store: Store,
    pub rating_count: i64,
    pub average_rating: Option<f64>,
    pub recent_ratings: Vec<super::RatingWithRater>,
}

/// Public JSON shape of a store with aggregates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub id: StoreId,
    pub name: String,
    pub email: Email,
    pub address: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub rating_count: i64,
    pub average_rating: Option<f64>,
}

impl From<StoreWithStats> for StoreResponse {
    fn from(entry: StoreWithStats) -> Self {
        Self {
            id: entry.store.id,
            name: entry.store.name,
            email: entry.store.email,
            address: entry.store.address,
            owner_id: entry.store.owner_id,
            created_at: entry.store.created_at,
            rating_count: entry.rating_count,
            average_rating: entry.average_rating,
        }
    }
}

/// Admin listing shape: a store plus its owner account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreWithOwnerResponse {
    #[serde(flatten)]
    pub store: StoreResponse,
    pub owner: UserResponse,
}

impl From<StoreWithOwner> for StoreWithOwnerResponse {
    fn from(entry: StoreWithOwner) -> Self {
        Self {
            store: StoreWithStats {
                store: entry.store,
                rating_count: entry.rating_count,
                average_rating: entry.average_rating,
            }
            .into(),
            owner: entry.owner.into(),
        }
    }
}

/// Detail view shape, including the caller's own rating when known.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetailResponse {
    #[serde(flatten)]
    pub store: StoreResponse,
    pub owner_name: String,
    pub user_rating: Option<i64>,
}

impl From<StoreDetail> for StoreDetailResponse {
    fn from(detail: StoreDetail) -> Self {
        Self {
            store: StoreWithStats {
                store: detail.store,
                rating_count: detail.rating_count,
                average_rating: detail.average_rating,
            }
            .into(),
            owner_name: detail.owner_name,
            user_rating: detail.user_rating,
        }
    }
}

/// Store-owner dashboard shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboardResponse {
    #[serde(flatten)]
    pub store: StoreResponse,
    pub recent_ratings: Vec<RatingWithRaterResponse>,
}

impl From<OwnerDashboard> for OwnerDashboardResponse {
    fn from(dashboard: OwnerDashboard) -> Self {
        Self {
            store: StoreWithStats {
                store: dashboard.store,
                rating_count: dashboard.rating_count,
                average_rating: dashboard.average_rating,
            }
            .into(),
            recent_ratings: dashboard
                .recent_ratings
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
