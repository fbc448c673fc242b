//! In-memory storage backend

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{Result, VaultError};

/// Process-local key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one raw value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());

        Self {
            entries: RwLock::new(entries),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `set` calls observed so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn poisoned<T>(_: T) -> VaultError {
    VaultError::StorageError("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);

        debug!("Stored key: {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        if entries.remove(key).is_some() {
            debug!("Removed key: {}", key);
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "In-Memory Storage"
    }
}
