//! Required-field validation for the registration record

use super::field::{FieldId, FieldRef};
use super::form_state::FormRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Wire key reserved for whole-form errors
pub const GENERAL_KEY: &str = "general";

/// Key of an entry in a [`ValidationErrorMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    Field(FieldId),
    General,
}

impl ErrorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Field(id) => id.as_str(),
            Self::General => GENERAL_KEY,
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field → message map of currently invalid fields, in insertion order.
///
/// Each key appears at most once; re-inserting a key replaces its message in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorMap {
    entries: Vec<(ErrorKey, String)>,
}

impl ValidationErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding a single whole-form message
    pub fn general(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(ErrorKey::General, message);
        map
    }

    pub fn insert(&mut self, key: ErrorKey, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((key, message)),
        }
    }

    pub fn remove(&mut self, key: ErrorKey) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, key: ErrorKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, m)| m.as_str())
    }

    pub fn field(&self, id: FieldId) -> Option<&str> {
        self.get(ErrorKey::Field(id))
    }

    pub fn general_message(&self) -> Option<&str> {
        self.get(ErrorKey::General)
    }

    pub fn contains(&self, key: ErrorKey) -> bool {
        self.get(key).is_some()
    }

    /// First field-keyed entry in insertion order
    pub fn first_field(&self) -> Option<FieldId> {
        self.entries.iter().find_map(|(k, _)| match k {
            ErrorKey::Field(id) => Some(*id),
            ErrorKey::General => None,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = ErrorKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
        self.entries.iter().map(|(k, m)| (*k, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Build a map from a server-supplied `{field: message}` object.
    ///
    /// Field entries follow form order so `first_field` names the topmost
    /// rejected field. Keys that name no field are merged into the general
    /// entry.
    pub fn from_wire(errors: &BTreeMap<String, String>) -> Self {
        let mut map = Self::new();
        for id in FieldId::ALL {
            if let Some(message) = errors.get(id.as_str()) {
                map.insert(ErrorKey::Field(id), message.clone());
            }
        }

        let mut stray = Vec::new();
        for (key, message) in errors {
            if key == GENERAL_KEY {
                stray.push(message.clone());
            } else if key.parse::<FieldId>().is_err() {
                tracing::warn!(key = %key, "server error refers to unknown field");
                stray.push(message.clone());
            }
        }
        if !stray.is_empty() {
            map.insert(ErrorKey::General, stray.join("; "));
        }
        map
    }
}

impl Serialize for ValidationErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, message) in &self.entries {
            map.serialize_entry(key.as_str(), message)?;
        }
        map.end()
    }
}

/// Text fields that must be non-blank, in check order
const REQUIRED_TEXT: [FieldId; 11] = [
    FieldId::LastName,
    FieldId::FirstName,
    FieldId::LastNameKana,
    FieldId::FirstNameKana,
    FieldId::Email,
    FieldId::Phone,
    FieldId::ZipCode,
    FieldId::Address,
    FieldId::Motivation,
    FieldId::EmergencyContactName,
    FieldId::EmergencyContactPhone,
];

/// Single-choice fields that must have a selection, in check order
const REQUIRED_CHOICE: [FieldId; 6] = [
    FieldId::Gender,
    FieldId::AgeGroup,
    FieldId::Occupation,
    FieldId::Education,
    FieldId::Prefecture,
    FieldId::NearestStation,
];

/// Whether `id` carries any validity constraint
pub fn is_required(id: FieldId) -> bool {
    REQUIRED_TEXT.contains(&id)
        || REQUIRED_CHOICE.contains(&id)
        || matches!(id, FieldId::Interests | FieldId::PrivacyPolicyAgreed)
}

/// Check every rule against `record` and collect the failures.
///
/// Every rule runs; the result's order is the rule order, which is also the
/// order used to pick the field that receives focus.
pub fn validate(record: &FormRecord) -> ValidationErrorMap {
    let mut errors = ValidationErrorMap::new();

    for id in REQUIRED_TEXT {
        if let FieldRef::Text(value) = record.get(id) {
            if value.trim().is_empty() {
                errors.insert(ErrorKey::Field(id), format!("{} is required", id.label()));
            }
        }
    }

    for id in REQUIRED_CHOICE {
        if let FieldRef::Choice(value) = record.get(id) {
            if value.trim().is_empty() {
                errors.insert(ErrorKey::Field(id), format!("{} is required", id.label()));
            }
        }
    }

    if record.interests.is_empty() {
        errors.insert(
            ErrorKey::Field(FieldId::Interests),
            "Select at least one interest",
        );
    }

    if !record.privacy_policy_agreed {
        errors.insert(
            ErrorKey::Field(FieldId::PrivacyPolicyAgreed),
            "You must agree to the privacy policy",
        );
    }

    errors
}

pub fn has_validation_errors(errors: &ValidationErrorMap) -> bool {
    !errors.is_empty()
}
