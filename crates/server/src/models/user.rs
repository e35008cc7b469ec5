//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ratestore_core::{Email, Role, StoreId, UserId};

/// An account (domain type).
///
/// The password hash never lives on this type; repositories return it
/// separately and only where credential verification needs it.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique account ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique across all accounts.
    pub email: Email,
    /// Postal address.
    pub address: String,
    /// Account role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account. The password arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub address: String,
    pub role: Role,
}

/// A user together with their store, if they own one (admin listing).
#[derive(Debug, Clone)]
pub struct UserWithStore {
    pub user: User,
    pub store: Option<OwnedStoreSummary>,
}

/// Minimal store info attached to a user in the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedStoreSummary {
    pub id: StoreId,
    pub name: String,
    pub rating_count: i64,
}

/// Public JSON shape of an account. Never includes the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub address: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            address: user.address,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Admin listing shape: a user plus their store, if any.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStoreResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub store: Option<OwnedStoreSummary>,
}

impl From<UserWithStore> for UserWithStoreResponse {
    fn from(entry: UserWithStore) -> Self {
        Self {
            user: entry.user.into(),
            store: entry.store,
        }
    }
}
