//! # vault-core
//!
//! Core functionality for Site Vault, a local store of site credentials:
//! - Credential records (site label, URL, password) kept in insertion order
//! - Form draft validation with user-facing messages
//! - Create / edit / delete lifecycle driven by [`CredentialManager`]
//! - Pluggable key-value storage: in-memory or a JSON file on disk
//!
//! Passwords are stored as entered; nothing here encrypts them.

pub mod credential;
pub mod error;
pub mod settings;
pub mod storage;

pub use credential::{
    validate, CredentialManager, CredentialRecord, Draft, Field, Mode, PersistentStore,
    ValidationErrors, ValidationRules,
};
pub use error::{Result, VaultError};
pub use settings::{Settings, SettingsManager};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
