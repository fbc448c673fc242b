//! Draft validation

use url::Url;

use super::types::{Draft, Field, ValidationErrors};
use crate::settings::Settings;

/// Default minimum password length
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Rules applied to a draft before it may be committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub min_password_length: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl From<&Settings> for ValidationRules {
    fn from(settings: &Settings) -> Self {
        Self {
            min_password_length: settings.min_password_length,
        }
    }
}

impl ValidationRules {
    /// Check every field of `draft`. Has no side effects.
    pub fn validate(&self, draft: &Draft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if draft.site.trim().is_empty() {
            errors.insert(Field::Site, "Site name is required.");
        }

        if draft.url.trim().is_empty() {
            errors.insert(Field::Url, "URL is required.");
        } else if !is_well_formed_url(&draft.url) {
            errors.insert(Field::Url, "Enter a valid URL (e.g., https://example.com).");
        }

        if draft.password.trim().is_empty() {
            errors.insert(Field::Password, "Password is required.");
        } else if password_length(&draft.password) < self.min_password_length {
            errors.insert(
                Field::Password,
                format!(
                    "Password must be at least {} characters.",
                    self.min_password_length
                ),
            );
        }

        errors
    }
}

/// Validate with the default rules
pub fn validate(draft: &Draft) -> ValidationErrors {
    ValidationRules::default().validate(draft)
}

/// Length in UTF-16 code units, the unit browser form fields count in
pub fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

/// True when `value` parses as an absolute URL
pub fn is_well_formed_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}
