//! User repository for database operations.
//!
//! Queries use runtime-checked `sqlx::query_as` with explicit row structs;
//! rows are converted to domain types at the repository boundary so invalid
//! stored data surfaces as `RepositoryError::DataCorruption` rather than
//! leaking into handlers.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use ratestore_core::{Email, Role, StoreId, UserId};

use super::RepositoryError;
use crate::models::user::{NewUser, OwnedStoreSummary, User, UserWithStore};

const ALL_COLUMNS: &str =
    "id, name, email, password_hash, address, role, created_at, updated_at";

/// Raw database row for the `users` table.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    address: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Split the row into the domain user and its password hash.
    fn into_parts(self) -> Result<(User, String), RepositoryError> {
        let id = UserId::parse(&self.id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
        })?;
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = self.role.parse::<Role>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok((
            User {
                id,
                name: self.name,
                email,
                address: self.address,
                role,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            self.password_hash,
        ))
    }

    fn into_user(self) -> Result<User, RepositoryError> {
        self.into_parts().map(|(user, _)| user)
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewUser) -> Result<User, RepositoryError> {
        let id = UserId::generate();
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, name, email, password_hash, address, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {ALL_COLUMNS}"
        ))
        .bind(id.to_string())
        .bind(&new.name)
        .bind(new.email.as_str())
        .bind(&new.password_hash)
        .bind(&new.address)
        .bind(new.role.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "email already exists"))?;

        row.into_user()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user and their password hash by email, for credential checks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_parts).transpose()
    }

    /// Get a user's password hash by ID, for password changes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        id: UserId,
    ) -> Result<Option<String>, RepositoryError> {
        let hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(self.pool)
            .await?;

        Ok(hash)
    }

    /// Update a user's name and address. Email and role are immutable here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        name: &str,
        address: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET name = ?, address = ?, updated_at = ?
             WHERE id = ?
             RETURNING {ALL_COLUMNS}"
        ))
        .bind(name)
        .bind(address)
        .bind(Utc::now())
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_user()
    }

    /// Replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all users, newest first, each with their store if they own one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_store(&self) -> Result<Vec<UserWithStore>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            id: String,
            name: String,
            email: String,
            address: String,
            role: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            store_id: Option<String>,
            store_name: Option<String>,
            store_rating_count: Option<i64>,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT u.id, u.name, u.email, u.address, u.role, u.created_at, u.updated_at,
                    s.id AS store_id, s.name AS store_name,
                    (SELECT COUNT(*) FROM ratings r WHERE r.store_id = s.id) AS store_rating_count
             FROM users u
             LEFT JOIN stores s ON s.owner_id = u.id
             ORDER BY u.created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let id = UserId::parse(&row.id).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
            })?;
            let email = Email::parse(&row.email).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
            })?;
            let role = row.role.parse::<Role>().map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
            })?;

            let store = match (row.store_id, row.store_name) {
                (Some(store_id), Some(store_name)) => Some(OwnedStoreSummary {
                    id: StoreId::parse(&store_id).map_err(|e| {
                        RepositoryError::DataCorruption(format!(
                            "invalid store id in database: {e}"
                        ))
                    })?,
                    name: store_name,
                    rating_count: row.store_rating_count.unwrap_or(0),
                }),
                _ => None,
            };

            users.push(UserWithStore {
                user: User {
                    id,
                    name: row.name,
                    email,
                    address: row.address,
                    role,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
                store,
            });
        }

        Ok(users)
    }

    /// Total number of accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
