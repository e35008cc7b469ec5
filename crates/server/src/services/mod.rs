//! Business-logic services.
//!
//! - [`auth`] - account creation, credential verification, profile and
//!   password changes
//! - [`token`] - session token issuance and verification
//! - [`ratings`] - rating aggregation helpers

pub mod auth;
pub mod ratings;
pub mod token;
