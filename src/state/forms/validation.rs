//! Presence checks run on submit

use super::field::{FieldName, FormFields};
use std::collections::BTreeMap;

/// Per-field error messages, present only for fields that failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldName, String>);

impl ValidationErrors {
    /// Error message for a field, if it failed validation
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failed fields in display order
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Check every field for a non-blank value
///
/// A field fails when its trimmed value is empty. The returned map holds
/// exactly the failed fields.
pub fn validate(fields: &FormFields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in FieldName::ALL {
        if fields.get(field).trim().is_empty() {
            errors.insert(field, field.required_message());
        }
    }
    errors
}
