//! Authentication error types.

use api_client::ApiError;
use session::SessionError;
use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input rejected before contacting anything.
    #[error("{0}")]
    Validation(String),

    /// No session is active.
    #[error("Please sign in first")]
    NotAuthenticated,

    /// The backend rejected or failed the request.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The session could not be persisted or read.
    #[error("{0}")]
    Session(#[from] SessionError),

    /// The stored user could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
