//! RateStore Core - Shared types library.
//!
//! This crate provides common types used across all RateStore components:
//! - `server` - The public JSON API service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and
//!   rating values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
