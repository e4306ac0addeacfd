//! Logis Core Types
//!
//! This crate provides the fundamental types shared by the Logis client crates:
//! - Domain models for houses, rooms, contracts and user profiles
//! - Access-token claims and role gating
//! - Client-side form validation
//! - Core error types

#[macro_use]
mod wire;

pub mod access;
pub mod claims;
pub mod de;
pub mod error;
pub mod listing;
pub mod models;
pub mod role;
pub mod validation;

pub use access::{AccessGuard, AccessState, Landing, Redirect};
pub use claims::Claims;
pub use error::{Error, Result};
pub use listing::normalize_list;
pub use role::Role;
pub use validation::FieldErrors;
