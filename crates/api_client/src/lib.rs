//! HTTP client for the Taskboard REST backend
//!
//! Wraps `reqwest` with the base URL, bearer-token injection from session
//! storage, and normalization of backend failures into one readable message.

mod client;
mod error;

pub use client::ApiClient;
pub use error::*;

/// Default API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
