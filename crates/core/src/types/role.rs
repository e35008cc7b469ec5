//! Account roles.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// The role model is flat and closed: exactly three disjoint roles with no
/// hierarchy. An administrator is not implicitly permitted on owner-only or
/// user-only routes. Every authorization check matches exhaustively on this
/// enum, so adding a role forces each gate to be revisited.
///
/// Serialized (JSON and database) as `NORMAL_USER`, `STORE_OWNER`, or
/// `SYSTEM_ADMIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A regular account that browses and rates stores.
    NormalUser,
    /// An account owning exactly one store.
    StoreOwner,
    /// A platform administrator managing users and stores.
    SystemAdmin,
}

/// Error returned when parsing an unknown role string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid role: {0}")]
pub struct RoleParseError(String);

impl Role {
    /// All roles, in no particular order.
    pub const ALL: [Self; 3] = [Self::NormalUser, Self::StoreOwner, Self::SystemAdmin];

    /// The canonical string form stored in the database and sent over the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NormalUser => "NORMAL_USER",
            Self::StoreOwner => "STORE_OWNER",
            Self::SystemAdmin => "SYSTEM_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL_USER" => Ok(Self::NormalUser),
            "STORE_OWNER" => Ok(Self::StoreOwner),
            "SYSTEM_ADMIN" => Ok(Self::SystemAdmin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}
