//! File-backed session storage
//!
//! Values live in a single JSON object on disk. Every read goes back to the
//! file so that sessions started or ended by another process are observed.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::{SessionError, SessionResult, SessionStorage};

/// Directory name under the platform config directory
pub const APP_DIR: &str = "taskboard";

/// File name of the session file
pub const SESSION_FILE: &str = "session.json";

/// Default location of the session file
pub fn default_session_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(SESSION_FILE)
}

/// Session storage persisted to a JSON file
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates a storage backed by the file at `path`; the file is created
    /// lazily on the first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> SessionResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(values)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), entries = values.len(), "Wrote session file");
        Ok(())
    }

    fn update<F>(&self, f: F) -> SessionResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(SessionError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Replacing corrupt session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        f(&mut values);
        self.write_all(&values)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SESSION_FILE);

        let storage = FileSessionStorage::new(&path);
        storage.set(keys::TOKEN, "jwt_abc").unwrap();
        storage.set(keys::USER, r#"{"id":"1"}"#).unwrap();

        let reopened = FileSessionStorage::new(&path);
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("jwt_abc"));
        assert_eq!(reopened.get(keys::USER).unwrap().as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join(SESSION_FILE));

        assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
        storage.remove(keys::TOKEN).unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join(SESSION_FILE));

        storage.set(keys::TOKEN, "t").unwrap();
        storage.set("theme", "dark").unwrap();
        storage.remove(keys::TOKEN).unwrap();

        assert_eq!(storage.get(keys::TOKEN).unwrap(), None);
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        fs::write(&path, "not json").unwrap();

        let storage = FileSessionStorage::new(&path);
        assert!(matches!(
            storage.get(keys::TOKEN),
            Err(SessionError::Serialization(_))
        ));
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        fs::write(&path, "{truncated").unwrap();
        let storage = FileSessionStorage::new(&path);

        storage.remove(keys::USER).unwrap();
        assert_eq!(storage.get(keys::TOKEN).unwrap(), None);

        fs::write(&path, "{truncated").unwrap();
        storage.set(keys::TOKEN, "jwt_new").unwrap();
        assert_eq!(storage.get(keys::TOKEN).unwrap().as_deref(), Some("jwt_new"));
    }
}
