use crate::{Result, role::Role, validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /token/`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account summary some server versions return next to the tokens
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Response of `POST /token/`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

/// Body of `POST /token/refresh/`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response of `POST /token/refresh/`
///
/// A new refresh token is only present when the server rotates them.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Body of `POST /register/`
#[derive(Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: String,
    pub cni: String,
    pub role: Role,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl Registration {
    pub fn validate(&self) -> Result<()> {
        validation::validate_registration(self).into_result()
    }
}
