//! Access-token claims
//!
//! The payload segment of the access token is decoded without any signature
//! check. The result only drives presentation (navigation, redirects, which
//! actions are offered); the server authorizes every request on its own.

use crate::{Error, Result, role::Role};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims read from an access token payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Expiry as seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Decode the payload segment of a JWT
    ///
    /// Accepts both the URL-safe and the standard base64 alphabets, with or
    /// without padding.
    pub fn decode(token: &str) -> Result<Self> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next()) {
            (Some(_), Some(payload)) if !payload.is_empty() => payload,
            _ => {
                return Err(Error::InvalidToken(
                    "expected header.payload[.signature]".to_string(),
                ));
            }
        };

        let trimmed = payload.trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(trimmed)
            .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
            .map_err(|e| Error::InvalidToken(format!("payload is not base64: {}", e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::InvalidToken(format!("payload is not a JSON object: {}", e)))
    }

    /// Name to greet the user with: first name, else username
    pub fn display_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Whether the token claims to be expired at `now`
    ///
    /// Tokens without an `exp` claim are never considered expired here.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}
