//! File storage backend
//!
//! Keeps every entry in a single JSON file in the user's data directory.
//! Values are stored verbatim; the whole file is rewritten on each change.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{Result, VaultError};

/// File name of the entries file inside the storage directory
const STORAGE_FILE: &str = "storage.json";

/// JSON-file storage backend
#[derive(Debug)]
pub struct FileStore {
    /// Directory for storage files
    storage_dir: PathBuf,
    /// In-memory copy of the file contents
    entries: RwLock<HashMap<String, String>>,
    /// Write indented JSON
    pretty: bool,
}

/// File format for persistent storage
#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    version: u32,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store in the default data directory
    pub fn new() -> Result<Self> {
        Self::open(Self::default_dir()?)
    }

    /// Open the store in a custom directory, loading any existing entries
    pub fn open(storage_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&storage_dir)?;

        let entries = Self::load(&storage_dir.join(STORAGE_FILE))?;
        debug!(
            "File storage opened at {:?} with {} entries",
            storage_dir,
            entries.len()
        );

        Ok(Self {
            storage_dir,
            entries: RwLock::new(entries),
            pretty: false,
        })
    }

    /// Write indented JSON on subsequent saves
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Get the default storage directory
    pub fn default_dir() -> Result<PathBuf> {
        ProjectDirs::from("com", "site-vault", "site-vault")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                VaultError::StorageError("Could not determine data directory".to_string())
            })
    }

    /// Get the storage directory path
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn storage_file_path(&self) -> PathBuf {
        self.storage_dir.join(STORAGE_FILE)
    }

    fn load(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            debug!("No existing storage file found");
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let file: StorageFile = serde_json::from_str(&contents)?;
        Ok(file.entries)
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let file = StorageFile {
            version: 1,
            entries: entries.clone(),
        };

        let contents = if self.pretty {
            serde_json::to_string_pretty(&file)?
        } else {
            serde_json::to_string(&file)?
        };
        let path = self.storage_file_path();

        // Write atomically using a temp file
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, &contents)?;
        std::fs::rename(&temp_path, &path)?;

        debug!("Saved {} entries to {:?}", entries.len(), path);
        Ok(())
    }
}

fn poisoned<T>(_: T) -> VaultError {
    VaultError::StorageError("file store lock poisoned".to_string())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;

        // Cache only changes once the file has been written
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *entries = updated;

        debug!("Stored key: {}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;

        if entries.contains_key(key) {
            let mut updated = entries.clone();
            updated.remove(key);
            self.persist(&updated)?;
            *entries = updated;
            debug!("Removed key: {}", key);
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "File Storage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().to_path_buf()).unwrap();

        store.set("credentials", "[]").unwrap();
        assert_eq!(store.get("credentials").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_get_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_persistence() {
        let temp_dir = TempDir::new().unwrap();

        {
            let store = FileStore::open(temp_dir.path().to_path_buf()).unwrap();
            store.set("persistent-key", "persistent-value").unwrap();
        }

        {
            let store = FileStore::open(temp_dir.path().to_path_buf()).unwrap();
            assert_eq!(
                store.get("persistent-key").unwrap(),
                Some("persistent-value".to_string())
            );
        }
    }

    #[test]
    fn test_remove_persists() {
        let temp_dir = TempDir::new().unwrap();

        {
            let store = FileStore::open(temp_dir.path().to_path_buf())
                .unwrap()
                .with_pretty(true);
            store.set("a", "1").unwrap();
            store.set("b", "2").unwrap();
            store.remove("a").unwrap();
        }

        let store = FileStore::open(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
        assert!(!temp_dir.path().join("storage.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().to_path_buf()).unwrap();
        store.set("key", "old").unwrap();

        // The temp file path is taken by a directory, so writes fail
        std::fs::create_dir(temp_dir.path().join("storage.tmp")).unwrap();

        assert!(matches!(store.set("key", "new"), Err(VaultError::IoError(_))));
        assert!(store.set("other", "value").is_err());
        assert!(store.remove("key").is_err());

        assert_eq!(store.get("key").unwrap(), Some("old".to_string()));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(STORAGE_FILE), "not json").unwrap();

        let result = FileStore::open(temp_dir.path().to_path_buf());
        assert!(matches!(result, Err(VaultError::SerializationError(_))));
    }
}
