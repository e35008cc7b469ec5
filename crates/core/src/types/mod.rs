//! Shared domain types.

mod email;
mod id;
mod rating;
mod role;

pub use email::{Email, EmailError};
pub use id::{RatingId, StoreId, UserId};
pub use rating::{RatingValue, RatingValueError};
pub use role::{Role, RoleParseError};
