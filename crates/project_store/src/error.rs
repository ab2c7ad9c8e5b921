//! Project store error types.

use api_client::ApiError;
use thiserror::Error;

/// Errors that can occur during project store operations.
#[derive(Debug, Error)]
pub enum ProjectStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The backend rejected or failed the request.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ProjectStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

/// Result type for project store operations.
pub type ProjectStoreResult<T> = Result<T, ProjectStoreError>;
