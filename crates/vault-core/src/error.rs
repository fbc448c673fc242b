//! Error types for vault-core

use thiserror::Error;
use uuid::Uuid;

use crate::credential::ValidationErrors;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Vault error types
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Index {index} is out of range for {len} stored credentials")]
    OutOfRange { index: usize, len: usize },

    #[error("Stored value under '{key}' is malformed: {source}")]
    MalformedStorage {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Credential not found: {0}")]
    RecordNotFound(Uuid),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl VaultError {
    /// The field-level messages when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
