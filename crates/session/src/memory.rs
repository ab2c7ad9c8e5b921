//! In-memory session storage for testing

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{SessionError, SessionResult, SessionStorage};

/// In-memory session storage
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Creates an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage with pre-populated values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}
