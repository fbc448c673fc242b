//! Site credential records and their create/edit/delete lifecycle

mod manager;
mod store;
mod types;
mod validation;

pub use manager::CredentialManager;
pub use store::{PersistentStore, CREDENTIALS_KEY};
pub use types::*;
pub use validation::{
    is_well_formed_url, password_length, validate, ValidationRules, DEFAULT_MIN_PASSWORD_LENGTH,
};
