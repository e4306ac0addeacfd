//! Client error taxonomy and server error message normalization

use logis_storage::StorageError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No access token is stored; nothing was sent
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The access token was rejected and could not be refreshed
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request itself failed (connection, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Server returned no content")]
    EmptyResponse,

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] logis_core::Error),
}

impl ApiError {
    /// HTTP status of a server rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to log in again to continue
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::NotAuthenticated | ApiError::SessionExpired)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Extract a human readable message from an error response body
///
/// Uses `detail` when the body has one, otherwise every field message joined
/// with spaces (validation errors come as `{"field": ["message", ..]}`), and
/// `fallback` when the body is empty or not JSON.
pub fn error_message(body: &[u8], fallback: &str) -> String {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return fallback.to_string();
    };

    if let Some(detail) = value.get("detail").and_then(Value::as_str)
        && !detail.trim().is_empty()
    {
        return detail.to_string();
    }

    let mut parts = Vec::new();
    collect_messages(&value, &mut parts);
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(" ")
    }
}

fn collect_messages(value: &Value, parts: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.trim().is_empty() => parts.push(s.clone()),
        Value::Number(n) => parts.push(n.to_string()),
        Value::Array(items) => items.iter().for_each(|item| collect_messages(item, parts)),
        Value::Object(map) => map.values().for_each(|item| collect_messages(item, parts)),
        _ => {}
    }
}
