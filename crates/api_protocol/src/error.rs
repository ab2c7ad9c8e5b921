//! Error body shapes sent by the backend.
//!
//! The backend is not consistent about how it reports failures. A body may
//! be any of:
//!
//! - `{"message": "..."}`
//! - a bare JSON string
//! - `{"error": "..."}`
//! - a field-to-message map produced by request validation,
//!   e.g. `{"title": "Title is required"}`

use serde_json::Value;

/// Extracts a human-readable message from a parsed error body.
///
/// Returns `None` when the body carries nothing usable.
pub fn error_message(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(non_empty) {
        return Some(message);
    }
    if let Value::String(s) = body {
        return Some(s.clone());
    }
    if let Some(error) = body.get("error").and_then(non_empty) {
        return Some(error);
    }

    let values: Vec<String> = match body {
        Value::Object(map) => map.values().map(render).collect(),
        Value::Array(items) => items.iter().map(render).collect(),
        _ => return None,
    };
    let joined = values.join(", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn non_empty(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(render(other)),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
