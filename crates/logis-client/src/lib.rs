//! Logis API Client
//!
//! Typed access to the rental REST API:
//! - `ApiClient`, the authenticated request wrapper with single token refresh
//! - Login, registration and logout
//! - Resource clients for houses, rooms, contracts and the user profile
//! - The tenant catalogue of available rooms

pub mod api;
pub mod auth;
pub mod catalogue;
pub mod client;
pub mod contracts;
pub mod error;
pub mod houses;
pub mod profile;
pub mod rooms;

pub use api::{ApiClient, ApiConfig, ApiRequest, DEFAULT_BASE_URL, Payload};
pub use auth::LoginOutcome;
pub use catalogue::Catalogue;
pub use client::HttpClientConfig;
pub use contracts::Contracts;
pub use error::{ApiError, Result};
pub use houses::Houses;
pub use profile::ProfileClient;
pub use rooms::Rooms;
