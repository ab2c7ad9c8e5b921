//! Session storage error types

use thiserror::Error;

/// Errors that can occur during session storage operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the backing file failed
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of strings
    #[error("Session storage is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the storage was poisoned
    #[error("Session storage lock poisoned: {0}")]
    Lock(String),
}

/// Result type for session storage operations
pub type SessionResult<T> = Result<T, SessionError>;
