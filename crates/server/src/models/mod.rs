//! Domain models and API payload types.
//!
//! Domain types are validated structs separate from database row types; the
//! `*Response` types are the camelCase JSON shapes sent to clients.

pub mod rating;
pub mod store;
pub mod user;

pub use rating::{Rating, RatingResponse, RatingWithRater, RatingWithRaterResponse};
pub use store::{
    NewStore, OwnerDashboard, OwnerDashboardResponse, Store, StoreDetail, StoreDetailResponse,
    StoreResponse, StoreWithOwner, StoreWithOwnerResponse, StoreWithStats,
};
pub use user::{
    NewUser, OwnedStoreSummary, User, UserResponse, UserWithStore, UserWithStoreResponse,
};
