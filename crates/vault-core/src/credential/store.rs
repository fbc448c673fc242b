//! Persistence of the credential sequence under a single storage key

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::types::CredentialRecord;
use crate::error::{Result, VaultError};
use crate::storage::KeyValueStore;

/// Storage key for the credential sequence
pub const CREDENTIALS_KEY: &str = "credentials";

fn lacks_id(item: &Value) -> bool {
    item.get("id").is_none()
}

/// Reads and writes the whole credential sequence
pub struct PersistentStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistentStore {
    /// Create a store using the default key
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, CREDENTIALS_KEY)
    }

    /// Create a store using a custom key
    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored sequence. Absent or empty values load as empty.
    ///
    /// Records stored without an id are given one, and the sequence is
    /// written back so the ids stay the same on the next load.
    pub fn load(&self) -> Result<Vec<CredentialRecord>> {
        let raw = match self.storage.get(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                debug!("No credentials stored under '{}'", self.key);
                return Ok(Vec::new());
            }
        };

        let malformed = |source| VaultError::MalformedStorage {
            key: self.key.clone(),
            source,
        };

        let value: Value = serde_json::from_str(&raw).map_err(malformed)?;

        let (records, missing_ids) = match value {
            Value::Object(_) => {
                warn!(
                    "Stored value under '{}' is a single record, normalizing to a list",
                    self.key
                );
                let missing = lacks_id(&value);
                let record: CredentialRecord = serde_json::from_value(value).map_err(malformed)?;
                (vec![record], missing)
            }
            other => {
                let missing = other
                    .as_array()
                    .map(|items| items.iter().any(lacks_id))
                    .unwrap_or(false);
                let records: Vec<CredentialRecord> =
                    serde_json::from_value(other).map_err(malformed)?;
                (records, missing)
            }
        };

        debug!("Loaded {} credentials from {}", records.len(), self.storage.backend_name());

        if missing_ids {
            debug!("Assigned ids to stored credentials, writing them back");
            if let Err(e) = self.save(&records) {
                warn!("Could not store assigned credential ids: {}", e);
            }
        }

        Ok(records)
    }

    /// Overwrite the stored sequence
    pub fn save(&self, records: &[CredentialRecord]) -> Result<()> {
        let data = serde_json::to_string(records)?;
        self.storage.set(&self.key, &data)?;

        debug!("Saved {} credentials to {}", records.len(), self.storage.backend_name());
        Ok(())
    }
}
