//! Form record and the state store that mutates it

use super::error::FormError;
use super::field::{FieldId, FieldKind, FieldRef, FieldValue};
use serde::{Deserialize, Serialize};

/// Complete value of every registration field.
///
/// Serializes to the flat camelCase JSON object sent to the registration
/// endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormRecord {
    // Basic information
    pub last_name: String,
    pub first_name: String,
    pub last_name_kana: String,
    pub first_name_kana: String,
    pub email: String,
    pub phone: String,
    pub zip_code: String,
    pub address: String,
    pub bio: String,
    pub motivation: String,

    // Selections
    pub gender: String,
    pub age_group: String,
    pub occupation: String,
    pub education: String,
    pub prefecture: String,
    pub nearest_station: String,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,

    // Details
    pub hobbies: Vec<String>,
    pub contact_time_slots: Vec<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub special_notes: String,
    pub appeal_points: String,
    pub preferred_work_location: String,
    pub preferred_job_type: String,

    // Consent
    pub privacy_policy_agreed: bool,
    pub newsletter_subscribed: bool,
    pub additional_requests: String,
}

impl FormRecord {
    /// Borrow a single field
    pub fn get(&self, id: FieldId) -> FieldRef<'_> {
        match id {
            FieldId::LastName => FieldRef::Text(&self.last_name),
            FieldId::FirstName => FieldRef::Text(&self.first_name),
            FieldId::LastNameKana => FieldRef::Text(&self.last_name_kana),
            FieldId::FirstNameKana => FieldRef::Text(&self.first_name_kana),
            FieldId::Email => FieldRef::Text(&self.email),
            FieldId::Phone => FieldRef::Text(&self.phone),
            FieldId::ZipCode => FieldRef::Text(&self.zip_code),
            FieldId::Address => FieldRef::Text(&self.address),
            FieldId::Bio => FieldRef::Text(&self.bio),
            FieldId::Motivation => FieldRef::Text(&self.motivation),
            FieldId::Gender => FieldRef::Choice(&self.gender),
            FieldId::AgeGroup => FieldRef::Choice(&self.age_group),
            FieldId::Occupation => FieldRef::Choice(&self.occupation),
            FieldId::Education => FieldRef::Choice(&self.education),
            FieldId::Prefecture => FieldRef::Choice(&self.prefecture),
            FieldId::NearestStation => FieldRef::Choice(&self.nearest_station),
            FieldId::Interests => FieldRef::Multi(&self.interests),
            FieldId::Skills => FieldRef::Multi(&self.skills),
            FieldId::Certifications => FieldRef::Multi(&self.certifications),
            FieldId::Hobbies => FieldRef::Multi(&self.hobbies),
            FieldId::ContactTimeSlots => FieldRef::Multi(&self.contact_time_slots),
            FieldId::EmergencyContactName => FieldRef::Text(&self.emergency_contact_name),
            FieldId::EmergencyContactPhone => FieldRef::Text(&self.emergency_contact_phone),
            FieldId::SpecialNotes => FieldRef::Text(&self.special_notes),
            FieldId::AppealPoints => FieldRef::Text(&self.appeal_points),
            FieldId::PreferredWorkLocation => FieldRef::Choice(&self.preferred_work_location),
            FieldId::PreferredJobType => FieldRef::Choice(&self.preferred_job_type),
            FieldId::PrivacyPolicyAgreed => FieldRef::Flag(self.privacy_policy_agreed),
            FieldId::NewsletterSubscribed => FieldRef::Flag(self.newsletter_subscribed),
            FieldId::AdditionalRequests => FieldRef::Text(&self.additional_requests),
        }
    }

    /// Text or choice slot for `id`
    fn string_slot(&mut self, id: FieldId) -> Option<&mut String> {
        let slot = match id {
            FieldId::LastName => &mut self.last_name,
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastNameKana => &mut self.last_name_kana,
            FieldId::FirstNameKana => &mut self.first_name_kana,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::ZipCode => &mut self.zip_code,
            FieldId::Address => &mut self.address,
            FieldId::Bio => &mut self.bio,
            FieldId::Motivation => &mut self.motivation,
            FieldId::Gender => &mut self.gender,
            FieldId::AgeGroup => &mut self.age_group,
            FieldId::Occupation => &mut self.occupation,
            FieldId::Education => &mut self.education,
            FieldId::Prefecture => &mut self.prefecture,
            FieldId::NearestStation => &mut self.nearest_station,
            FieldId::EmergencyContactName => &mut self.emergency_contact_name,
            FieldId::EmergencyContactPhone => &mut self.emergency_contact_phone,
            FieldId::SpecialNotes => &mut self.special_notes,
            FieldId::AppealPoints => &mut self.appeal_points,
            FieldId::PreferredWorkLocation => &mut self.preferred_work_location,
            FieldId::PreferredJobType => &mut self.preferred_job_type,
            FieldId::AdditionalRequests => &mut self.additional_requests,
            _ => return None,
        };
        Some(slot)
    }

    fn multi_slot(&mut self, id: FieldId) -> Option<&mut Vec<String>> {
        match id {
            FieldId::Interests => Some(&mut self.interests),
            FieldId::Skills => Some(&mut self.skills),
            FieldId::Certifications => Some(&mut self.certifications),
            FieldId::Hobbies => Some(&mut self.hobbies),
            FieldId::ContactTimeSlots => Some(&mut self.contact_time_slots),
            _ => None,
        }
    }

    fn flag_slot(&mut self, id: FieldId) -> Option<&mut bool> {
        match id {
            FieldId::PrivacyPolicyAgreed => Some(&mut self.privacy_policy_agreed),
            FieldId::NewsletterSubscribed => Some(&mut self.newsletter_subscribed),
            _ => None,
        }
    }
}

fn mismatch(field: FieldId, actual: FieldKind) -> FormError {
    FormError::KindMismatch {
        field,
        expected: field.kind(),
        actual,
    }
}

/// In-memory store owning the session's [`FormRecord`].
///
/// The store only replaces values; it never validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStore {
    record: FormRecord,
}

impl FormStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    /// Replace the value of `id`
    pub fn set_field(&mut self, id: FieldId, value: FieldValue) -> Result<(), FormError> {
        if value.kind() != id.kind() {
            return Err(mismatch(id, value.kind()));
        }
        match value {
            FieldValue::Text(s) | FieldValue::Choice(s) => {
                let slot = self
                    .record
                    .string_slot(id)
                    .ok_or_else(|| mismatch(id, FieldKind::Text))?;
                *slot = s;
            }
            FieldValue::Multi(items) => {
                let slot = self
                    .record
                    .multi_slot(id)
                    .ok_or_else(|| mismatch(id, FieldKind::Multi))?;
                // Keep set semantics even for wholesale replacement.
                slot.clear();
                for item in items {
                    if !slot.contains(&item) {
                        slot.push(item);
                    }
                }
            }
            FieldValue::Flag(b) => {
                let slot = self
                    .record
                    .flag_slot(id)
                    .ok_or_else(|| mismatch(id, FieldKind::Flag))?;
                *slot = b;
            }
        }
        tracing::debug!(field = %id, "field updated");
        Ok(())
    }

    /// Add or remove `value` in the multi-choice field `id`.
    ///
    /// Adding a value that is already present is a no-op; removal keeps the
    /// relative order of the remaining values.
    pub fn set_multi(&mut self, id: FieldId, value: &str, included: bool) -> Result<(), FormError> {
        let slot = self
            .record
            .multi_slot(id)
            .ok_or_else(|| mismatch(id, FieldKind::Multi))?;
        if included {
            if !slot.iter().any(|v| v == value) {
                slot.push(value.to_string());
            }
        } else {
            slot.retain(|v| v != value);
        }
        tracing::debug!(field = %id, value, included, "multi-choice toggled");
        Ok(())
    }

    /// Append a character to a text field
    pub fn push_char(&mut self, id: FieldId, c: char) -> Result<(), FormError> {
        if id.kind() != FieldKind::Text {
            return Err(mismatch(id, FieldKind::Text));
        }
        if let Some(slot) = self.record.string_slot(id) {
            slot.push(c);
        }
        Ok(())
    }

    /// Remove the last character of a text field
    pub fn pop_char(&mut self, id: FieldId) -> Result<(), FormError> {
        if id.kind() != FieldKind::Text {
            return Err(mismatch(id, FieldKind::Text));
        }
        if let Some(slot) = self.record.string_slot(id) {
            slot.pop();
        }
        Ok(())
    }

    /// Restore the initial record
    pub fn reset(&mut self) {
        self.record = FormRecord::default();
    }
}
