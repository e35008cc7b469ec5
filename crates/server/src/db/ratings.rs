//! Rating repository for database operations.
//!
//! The write path is a keyed upsert: the `UNIQUE (user_id, store_id)`
//! constraint plus `ON CONFLICT DO UPDATE` makes resubmission an in-place
//! value update in a single atomic statement, never a second row.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use ratestore_core::{RatingId, RatingValue, StoreId, UserId};

use super::RepositoryError;
use crate::models::rating::{Rating, RatingWithRater};

/// Raw database row for the `ratings` table.
#[derive(sqlx::FromRow)]
struct RatingRow {
    id: String,
    user_id: String,
    store_id: String,
    value: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RatingRow {
    fn into_rating(self) -> Result<Rating, RepositoryError> {
        Ok(Rating {
            id: RatingId::parse(&self.id).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid rating id in database: {e}"))
            })?,
            user_id: UserId::parse(&self.user_id).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
            })?,
            store_id: StoreId::parse(&self.store_id).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid store id in database: {e}"))
            })?,
            value: RatingValue::new(self.value).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid rating value in database: {e}"))
            })?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Platform-wide rating totals for the admin dashboard.
#[derive(Debug, Clone, Copy)]
pub struct RatingTotals {
    pub count: i64,
    pub average: Option<f64>,
}

/// Repository for rating database operations.
pub struct RatingRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RatingRepository<'a> {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or update the rating for a (user, store) pair.
    ///
    /// The upsert is a single atomic statement keyed on the pair's unique
    /// constraint; concurrent submissions by the same user for the same
    /// store resolve to last-write-wins with exactly one row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        store_id: StoreId,
        value: RatingValue,
    ) -> Result<Rating, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, RatingRow>(
            "INSERT INTO ratings (id, user_id, store_id, value, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (user_id, store_id)
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
             RETURNING id, user_id, store_id, value, created_at, updated_at",
        )
        .bind(RatingId::generate().to_string())
        .bind(user_id.to_string())
        .bind(store_id.to_string())
        .bind(value.get())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.into_rating()
    }

    /// Get one user's rating value for a store, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_value(
        &self,
        user_id: UserId,
        store_id: StoreId,
    ) -> Result<Option<i64>, RepositoryError> {
        let value = sqlx::query_scalar::<_, i64>(
            "SELECT value FROM ratings WHERE user_id = ? AND store_id = ?",
        )
        .bind(user_id.to_string())
        .bind(store_id.to_string())
        .fetch_optional(self.pool)
        .await?;

        Ok(value)
    }

    /// The most recent ratings for a store, newest first, with rater names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_store(
        &self,
        store_id: StoreId,
        limit: i64,
    ) -> Result<Vec<RatingWithRater>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: String,
            user_id: String,
            store_id: String,
            value: i64,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            rater_name: String,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT r.id, r.user_id, r.store_id, r.value, r.created_at, r.updated_at,
                    u.name AS rater_name
             FROM ratings r
             JOIN users u ON u.id = r.user_id
             WHERE r.store_id = ?
             ORDER BY r.created_at DESC
             LIMIT ?",
        )
        .bind(store_id.to_string())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        let mut ratings = Vec::with_capacity(rows.len());
        for row in rows {
            let rating = RatingRow {
                id: row.id,
                user_id: row.user_id,
                store_id: row.store_id,
                value: row.value,
                created_at: row.created_at,
                updated_at: row.updated_at,
            }
            .into_rating()?;

            ratings.push(RatingWithRater {
                rating,
                rater_name: row.rater_name,
            });
        }

        Ok(ratings)
    }

    /// Platform-wide rating count and raw (unrounded) average.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn totals(&self) -> Result<RatingTotals, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            count: i64,
            average: Option<f64>,
        }

        let row = sqlx::query_as::<_, Row>(
            "SELECT COUNT(*) AS count, AVG(value) AS average FROM ratings",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(RatingTotals {
            count: row.count,
            average: row.average,
        })
    }
}
