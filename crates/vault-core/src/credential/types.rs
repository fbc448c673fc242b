//! Credential type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::VaultError;

/// A stored site credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Stable identifier, assigned at creation and kept across updates.
    /// Records written without one are given one on their first load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// User-chosen label (e.g., "GitHub")
    pub site: String,

    /// Absolute URL of the site
    pub url: String,

    /// Password, stored verbatim
    pub password: String,
}

impl CredentialRecord {
    /// Create a record with a new id
    pub fn new(site: &str, url: &str, password: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            site: site.to_string(),
            url: url.to_string(),
            password: password.to_string(),
        }
    }

    /// Build a record from a draft, keeping the given id
    pub(crate) fn from_draft(id: Uuid, draft: Draft) -> Self {
        Self {
            id,
            site: draft.site,
            url: draft.url,
            password: draft.password,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("url", &self.url)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Form field of a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Site,
    Url,
    Password,
}

impl Field {
    /// All fields in form order
    pub const ALL: [Field; 3] = [Field::Site, Field::Url, Field::Password];

    /// Field name as used by form bindings and error mappings
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Site => "site",
            Field::Url => "url",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site" => Ok(Field::Site),
            "url" => Ok(Field::Url),
            "password" => Ok(Field::Password),
            other => Err(VaultError::UnknownField(other.to_string())),
        }
    }
}

/// In-progress form contents, not yet validated
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub site: String,
    pub url: String,
    pub password: String,
}

impl Draft {
    /// Create a draft from raw field values
    pub fn new(site: &str, url: &str, password: &str) -> Self {
        Self {
            site: site.to_string(),
            url: url.to_string(),
            password: password.to_string(),
        }
    }

    /// Read one field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Site => &self.site,
            Field::Url => &self.url,
            Field::Password => &self.password,
        }
    }

    /// Overwrite one field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Site => self.site = value,
            Field::Url => self.url = value,
            Field::Password => self.password = value,
        }
    }

    /// True when every field is empty
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

impl From<&CredentialRecord> for Draft {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            site: record.site.clone(),
            url: record.url.clone(),
            password: record.password.clone(),
        }
    }
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("site", &self.site)
            .field("url", &self.url)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Field name to user-facing message. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for one field, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Failed fields in form order
    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Whether a commit will append or replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// No edit target; commit appends
    #[default]
    Create,
    /// Commit replaces the record at this index
    Edit(usize),
}

impl Mode {
    pub fn edit_target(&self) -> Option<usize> {
        match self {
            Mode::Create => None,
            Mode::Edit(index) => Some(*index),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Edit(_))
    }

    /// Heading for the form
    pub fn form_title(&self) -> &'static str {
        match self {
            Mode::Create => "Save credentials",
            Mode::Edit(_) => "Edit credential",
        }
    }

    /// Label for the submit action
    pub fn action_label(&self) -> &'static str {
        match self {
            Mode::Create => "Save",
            Mode::Edit(_) => "Update",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_str() {
        assert_eq!("url".parse::<Field>().unwrap(), Field::Url);
        assert!(matches!(
            "email".parse::<Field>(),
            Err(VaultError::UnknownField(name)) if name == "email"
        ));
    }

    #[test]
    fn test_record_debug_redacts_password() {
        let record = CredentialRecord::new("GitHub", "https://github.com", "hunter2hunter2");
        let debug = format!("{:?}", record);

        assert!(debug.contains("GitHub"));
        assert!(!debug.contains("hunter2hunter2"));
    }

    #[test]
    fn test_record_without_id_gets_one() {
        let json = r#"{"site":"A","url":"https://a.com","password":"12345678"}"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();

        assert!(!record.id.is_nil());
        assert_eq!(record.site, "A");
    }

    #[test]
    fn test_validation_errors_serialize_by_field_name() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Site, "Site name is required.");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"site":"Site name is required."}"#);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::Create.form_title(), "Save credentials");
        assert_eq!(Mode::Create.action_label(), "Save");
        assert_eq!(Mode::Edit(3).form_title(), "Edit credential");
        assert_eq!(Mode::Edit(3).action_label(), "Update");
        assert_eq!(Mode::Edit(3).edit_target(), Some(3));
    }
}
