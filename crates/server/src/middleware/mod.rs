//! Authentication middleware and extractors.

pub mod auth;

pub use auth::{OptionalSession, RequireAdmin, RequireSession, RequireStoreOwner, Session};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";
