//! Persisted session storage for Taskboard clients
//!
//! A small string key/value store holding what a browser client would keep
//! in local storage: the bearer token and the serialized signed-in user.

mod error;
mod file;
mod memory;

pub use error::*;
pub use file::*;
pub use memory::*;

/// Well-known storage keys
pub mod keys {
    /// Opaque bearer token
    pub const TOKEN: &str = "token";

    /// JSON-serialized signed-in user
    pub const USER: &str = "user";
}

/// Trait for session storage access
pub trait SessionStorage: Send + Sync {
    /// Gets a value
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Sets a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> SessionResult<()>;

    /// Removes a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> SessionResult<()>;

    /// Checks if a value exists
    fn contains(&self, key: &str) -> SessionResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Reads the stored bearer token
pub fn stored_token(storage: &dyn SessionStorage) -> SessionResult<Option<String>> {
    storage.get(keys::TOKEN)
}
