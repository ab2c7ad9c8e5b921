//! Client errors

use reqwest::StatusCode;
use thiserror::Error;

/// Client errors
///
/// `Display` yields the message meant for the user, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend could not be reached
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The backend answered with a body of the wrong shape
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the backend reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Returns true if the backend rejected the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when the backend cannot be reached
pub fn unreachable_message(base_url: &str) -> String {
    format!(
        "Unable to reach the server. Check that the backend is running at {}",
        base_url
    )
}

/// Message used when an error body carries nothing usable
pub fn default_status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Error {}: {}", status.as_u16(), reason),
        None => format!("Error {}", status.as_u16()),
    }
}

/// Message used when an error body is not JSON at all
pub fn fallback_status_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "Invalid email or password".to_string(),
        StatusCode::NOT_FOUND => "Endpoint not found".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => {
            "Server error. Check that the backend is running.".to_string()
        }
        other => default_status_message(other),
    }
}
