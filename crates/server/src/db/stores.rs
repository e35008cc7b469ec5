//! Store repository for database operations.
//!
//! Owner+store creation is the one multi-statement operation in the system
//! and runs inside a single transaction: either both rows land or neither
//! does.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use ratestore_core::{Email, Role, StoreId, UserId};

use super::RepositoryError;
use crate::models::store::{NewStore, Store, StoreDetail, StoreWithOwner, StoreWithStats};
use crate::models::user::{NewUser, User};
use crate::services::ratings::round_average;

/// Raw database row for the `stores` table plus rating aggregates.
#[derive(sqlx::FromRow)]
struct StoreStatsRow {
    id: String,
    name: String,
    email: String,
    address: String,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    rating_count: i64,
    average_rating: Option<f64>,
}

impl StoreStatsRow {
    fn into_stats(self) -> Result<StoreWithStats, RepositoryError> {
        let average_rating = round_average(self.average_rating);
        Ok(StoreWithStats {
            store: Store {
                id: StoreId::parse(&self.id).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid store id in database: {e}"))
                })?,
                name: self.name,
                email: Email::parse(&self.email).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
                })?,
                address: self.address,
                owner_id: UserId::parse(&self.owner_id).map_err(|e| {
                    RepositoryError::DataCorruption(format!("invalid owner id in database: {e}"))
                })?,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            rating_count: self.rating_count,
            average_rating,
        })
    }
}

/// Aggregate SELECT list shared by the listing queries.
const STATS_SELECT: &str =
    "SELECT s.id, s.name, s.email, s.address, s.owner_id, s.created_at, s.updated_at,
            COUNT(r.id) AS rating_count, AVG(r.value) AS average_rating
     FROM stores s
     LEFT JOIN ratings r ON r.store_id = s.id";

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomically create a store owner account and their store.
    ///
    /// Either both rows are created or neither is.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the owner email or the store
    /// email already exists. Returns `RepositoryError::Database` for other
    /// database errors.
    pub async fn create_with_owner(
        &self,
        owner: &NewUser,
        store: &NewStore,
    ) -> Result<(User, Store), RepositoryError> {
        debug_assert_eq!(owner.role, Role::StoreOwner);

        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let owner_id = UserId::generate();
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, address, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(owner_id.to_string())
        .bind(&owner.name)
        .bind(owner.email.as_str())
        .bind(&owner.password_hash)
        .bind(&owner.address)
        .bind(owner.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            RepositoryError::from_unique_violation(e, "user with this email already exists")
        })?;

        let store_id = StoreId::generate();
        sqlx::query(
            "INSERT INTO stores (id, name, email, address, owner_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(store_id.to_string())
        .bind(&store.name)
        .bind(store.email.as_str())
        .bind(&store.address)
        .bind(owner_id.to_string())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            RepositoryError::from_unique_violation(e, "store with this email already exists")
        })?;

        tx.commit().await?;

        let created_owner = User {
            id: owner_id,
            name: owner.name.clone(),
            email: owner.email.clone(),
            address: owner.address.clone(),
            role: owner.role,
            created_at: now,
            updated_at: now,
        };
        let created_store = Store {
            id: store_id,
            name: store.name.clone(),
            email: store.email.clone(),
            address: store.address.clone(),
            owner_id,
            created_at: now,
            updated_at: now,
        };

        Ok((created_owner, created_store))
    }

    /// Whether a store with this ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: StoreId) -> Result<bool, RepositoryError> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stores WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(self.pool)
            .await?;

        Ok(found > 0)
    }

    /// List all stores, newest first, annotated with rating aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_stats(&self) -> Result<Vec<StoreWithStats>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreStatsRow>(&format!(
            "{STATS_SELECT} GROUP BY s.id ORDER BY s.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(StoreStatsRow::into_stats).collect()
    }

    /// List all stores with their owner accounts (admin view).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a store has no owner row.
    pub async fn list_with_owners(&self) -> Result<Vec<StoreWithOwner>, RepositoryError> {
        let stats = self.list_with_stats().await?;
        let users = super::users::UserRepository::new(self.pool);

        let mut stores = Vec::with_capacity(stats.len());
        for entry in stats {
            let owner = users
                .get_by_id(entry.store.owner_id)
                .await?
                .ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "store {} references missing owner {}",
                        entry.store.id, entry.store.owner_id
                    ))
                })?;

            stores.push(StoreWithOwner {
                store: entry.store,
                owner,
                rating_count: entry.rating_count,
                average_rating: entry.average_rating,
            });
        }

        Ok(stores)
    }

    /// Fetch one store's detail view, without the per-caller rating.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_detail(&self, id: StoreId) -> Result<Option<StoreDetail>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: String,
            name: String,
            email: String,
            address: String,
            owner_id: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            rating_count: i64,
            average_rating: Option<f64>,
            owner_name: String,
        }

        let row = sqlx::query_as::<_, Row>(
            "SELECT s.id, s.name, s.email, s.address, s.owner_id, s.created_at, s.updated_at,
                    COUNT(r.id) AS rating_count, AVG(r.value) AS average_rating,
                    u.name AS owner_name
             FROM stores s
             JOIN users u ON u.id = s.owner_id
             LEFT JOIN ratings r ON r.store_id = s.id
             WHERE s.id = ?
             GROUP BY s.id",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stats = StoreStatsRow {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            rating_count: row.rating_count,
            average_rating: row.average_rating,
        }
        .into_stats()?;

        Ok(Some(StoreDetail {
            store: stats.store,
            owner_name: row.owner_name,
            rating_count: stats.rating_count,
            average_rating: stats.average_rating,
            user_rating: None,
        }))
    }

    /// Fetch the store owned by an account, with rating aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Option<StoreWithStats>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreStatsRow>(&format!(
            "{STATS_SELECT} WHERE s.owner_id = ? GROUP BY s.id"
        ))
        .bind(owner_id.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(StoreStatsRow::into_stats).transpose()
    }

    /// Total number of stores.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stores")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
