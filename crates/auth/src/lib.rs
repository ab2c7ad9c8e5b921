//! Authentication state for Taskboard clients.
//!
//! This crate provides:
//! - The auth store: current user and token, persisted to session storage
//! - An API-backed authenticator talking to the backend
//! - A mock authenticator for offline use

mod authenticator;
mod error;
mod mock;
mod store;
mod validation;

pub use authenticator::*;
pub use error::*;
pub use mock::*;
pub use store::*;
pub use validation::*;

/// Minimum password length accepted by the mock authenticator.
pub const MIN_PASSWORD_LENGTH: usize = 6;
