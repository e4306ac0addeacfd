//! List response normalization
//!
//! List endpoints answer either with a bare JSON array or with a paginated
//! envelope `{"count": .., "results": [..]}`. Both become a plain `Vec`.

use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Normalize a list response body into a sequence of items
///
/// Any shape other than an array or an object holding a `results` array
/// yields an empty list. Items that fail to deserialize are an error.
pub fn normalize_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("List response has no 'results' array; treating it as empty");
                return Ok(Vec::new());
            }
        },
        other => {
            warn!("Unexpected list response shape: {}", shape_name(&other));
            return Ok(Vec::new());
        }
    };

    Ok(serde_json::from_value(Value::Array(items))?)
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
