//! Storage trait definitions

use crate::error::Result;

/// A local string-keyed storage medium.
///
/// Values are opaque text; callers own their encoding.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key` (no-op when absent)
    fn remove(&self, key: &str) -> Result<()>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}
