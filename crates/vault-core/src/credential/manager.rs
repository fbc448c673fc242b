//! Credential manager for the create/edit/delete lifecycle

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::store::PersistentStore;
use super::types::{CredentialRecord, Draft, Field, Mode, ValidationErrors};
use super::validation::ValidationRules;
use crate::error::{Result, VaultError};
use crate::settings::Settings;
use crate::storage::KeyValueStore;

/// Owns the record list, the form draft and the edit target for one session
pub struct CredentialManager {
    /// Persistence for the record list
    store: PersistentStore,
    /// Rules applied on commit
    rules: ValidationRules,
    /// Current records, in insertion order
    records: Vec<CredentialRecord>,
    /// Form contents
    draft: Draft,
    /// Create or Edit(index)
    mode: Mode,
    /// Messages from the last failed commit
    errors: ValidationErrors,
}

impl CredentialManager {
    /// Open a manager over `storage` with default settings, loading stored records
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::with_settings(storage, &Settings::default())
    }

    /// Open a manager using the key and rules from `settings`
    pub fn with_settings(storage: Arc<dyn KeyValueStore>, settings: &Settings) -> Result<Self> {
        let store = PersistentStore::with_key(storage, &settings.storage_key);
        let rules = ValidationRules::from(settings);
        let records = store.load()?;

        let invalid = records
            .iter()
            .filter(|record| !rules.validate(&Draft::from(*record)).is_empty())
            .count();
        if invalid > 0 {
            warn!("{} stored credentials do not pass current validation", invalid);
        }

        info!("Opened credential manager with {} credentials", records.len());

        Ok(Self {
            store,
            rules,
            records,
            draft: Draft::default(),
            mode: Mode::Create,
            errors: ValidationErrors::new(),
        })
    }

    /// Current records
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current form contents
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Messages from the last failed commit
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Index of the record with the given id
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&CredentialRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Set one draft field. No validation happens here.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Set one draft field by its form name
    pub fn update_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field: Field = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Validate the current draft without committing it
    pub fn validate(&self) -> ValidationErrors {
        self.rules.validate(&self.draft)
    }

    /// Validate the draft and, if valid, append it (Create) or replace the
    /// edit target (Edit), persist the full list, and reset the form.
    ///
    /// On validation failure nothing is written and the messages are both
    /// returned and kept in [`errors`](Self::errors).
    pub fn commit(&mut self) -> Result<&[CredentialRecord]> {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!("Commit rejected: {}", errors);
            self.errors = errors.clone();
            return Err(VaultError::Validation(errors));
        }

        let mut updated = self.records.clone();
        let draft = self.draft.clone();
        let mode = self.mode;

        match mode {
            Mode::Edit(index) => {
                let len = updated.len();
                let slot = updated
                    .get_mut(index)
                    .ok_or(VaultError::OutOfRange { index, len })?;
                *slot = CredentialRecord::from_draft(slot.id, draft);
                info!("Updated credential {} at index {}", slot.site, index);
            }
            Mode::Create => {
                let record = CredentialRecord::from_draft(Uuid::new_v4(), draft);
                info!("Added credential: {}", record.site);
                updated.push(record);
            }
        }

        self.store.save(&updated)?;

        self.records = updated;
        self.draft = Draft::default();
        self.mode = Mode::Create;
        self.errors = ValidationErrors::new();
        Ok(&self.records)
    }

    /// Load the record at `index` into the draft and target it for update
    pub fn begin_edit(&mut self, index: usize) -> Result<()> {
        let record = self.records.get(index).ok_or(VaultError::OutOfRange {
            index,
            len: self.records.len(),
        })?;

        self.draft = Draft::from(record);
        self.mode = Mode::Edit(index);
        self.errors = ValidationErrors::new();

        debug!("Editing credential at index {}", index);
        Ok(())
    }

    pub fn begin_edit_by_id(&mut self, id: Uuid) -> Result<()> {
        let index = self.position_of(id).ok_or(VaultError::RecordNotFound(id))?;
        self.begin_edit(index)
    }

    /// Leave Edit mode and clear the form without writing anything
    pub fn cancel_edit(&mut self) {
        self.draft = Draft::default();
        self.mode = Mode::Create;
        self.errors = ValidationErrors::new();
    }

    /// Delete the record at `index` and persist the shortened list.
    ///
    /// Removing the edit target leaves Edit mode and clears the form. An edit
    /// target after `index` shifts down with its record.
    pub fn remove(&mut self, index: usize) -> Result<CredentialRecord> {
        if index >= self.records.len() {
            return Err(VaultError::OutOfRange {
                index,
                len: self.records.len(),
            });
        }

        let mut updated = self.records.clone();
        let removed = updated.remove(index);
        self.store.save(&updated)?;
        self.records = updated;

        let mode = self.mode;
        match mode {
            Mode::Edit(target) if target == index => {
                debug!("Removed the credential being edited, leaving edit mode");
                self.cancel_edit();
            }
            Mode::Edit(target) if target > index => {
                self.mode = Mode::Edit(target - 1);
            }
            _ => {}
        }

        info!("Deleted credential {} at index {}", removed.site, index);
        Ok(removed)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> Result<CredentialRecord> {
        let index = self.position_of(id).ok_or(VaultError::RecordNotFound(id))?;
        self.remove(index)
    }

    /// Re-read the stored records, discarding the form and edit target
    pub fn reload(&mut self) -> Result<()> {
        self.records = self.store.load()?;
        self.cancel_edit();

        debug!("Reloaded {} credentials", self.records.len());
        Ok(())
    }
}
