//! Error types for Logis Core

use crate::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
