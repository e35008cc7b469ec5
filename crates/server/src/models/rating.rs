//! Rating domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ratestore_core::{RatingId, RatingValue, StoreId, UserId};

/// A rating (domain type).
///
/// At most one exists per (user, store) pair; resubmission updates the value
/// in place.
#[derive(Debug, Clone)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: UserId,
    pub store_id: StoreId,
    pub value: RatingValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A rating together with the rater's display name (owner dashboard).
#[derive(Debug, Clone)]
pub struct RatingWithRater {
    pub rating: Rating,
    pub rater_name: String,
}

/// Public JSON shape of a rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: RatingId,
    pub user_id: UserId,
    pub store_id: StoreId,
    pub value: RatingValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id,
            user_id: rating.user_id,
            store_id: rating.store_id,
            value: rating.value,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

/// Dashboard shape: a rating plus who submitted it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingWithRaterResponse {
    #[serde(flatten)]
    pub rating: RatingResponse,
    pub rater_name: String,
}

impl From<RatingWithRater> for RatingWithRaterResponse {
    fn from(entry: RatingWithRater) -> Self {
        Self {
            rating: entry.rating.into(),
            rater_name: entry.rater_name,
        }
    }
}
