//! Field identifiers and value objects

use super::FormError;
use std::fmt;
use std::str::FromStr;

/// Semantic kind of a registration field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// One value out of a catalog, or empty
    Choice,
    /// Any subset of a catalog, in selection order
    Multi,
    /// Boolean flag
    Flag,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Choice => "single choice",
            Self::Multi => "multiple choice",
            Self::Flag => "flag",
        }
    }
}

/// Display section a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Basic,
    Selections,
    Details,
    Consent,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Basic => "Basic information",
            Self::Selections => "Selections",
            Self::Details => "Details",
            Self::Consent => "Consent",
        }
    }
}

/// Closed set of registration field identifiers.
///
/// Declaration order is display order; [`FieldId::ALL`] follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    LastName,
    FirstName,
    LastNameKana,
    FirstNameKana,
    Email,
    Phone,
    ZipCode,
    Address,
    Bio,
    Motivation,
    Gender,
    AgeGroup,
    Occupation,
    Education,
    Prefecture,
    NearestStation,
    Interests,
    Skills,
    Certifications,
    Hobbies,
    ContactTimeSlots,
    EmergencyContactName,
    EmergencyContactPhone,
    SpecialNotes,
    AppealPoints,
    PreferredWorkLocation,
    PreferredJobType,
    PrivacyPolicyAgreed,
    NewsletterSubscribed,
    AdditionalRequests,
}

impl FieldId {
    pub const ALL: [FieldId; 30] = [
        Self::LastName,
        Self::FirstName,
        Self::LastNameKana,
        Self::FirstNameKana,
        Self::Email,
        Self::Phone,
        Self::ZipCode,
        Self::Address,
        Self::Bio,
        Self::Motivation,
        Self::Gender,
        Self::AgeGroup,
        Self::Occupation,
        Self::Education,
        Self::Prefecture,
        Self::NearestStation,
        Self::Interests,
        Self::Skills,
        Self::Certifications,
        Self::Hobbies,
        Self::ContactTimeSlots,
        Self::EmergencyContactName,
        Self::EmergencyContactPhone,
        Self::SpecialNotes,
        Self::AppealPoints,
        Self::PreferredWorkLocation,
        Self::PreferredJobType,
        Self::PrivacyPolicyAgreed,
        Self::NewsletterSubscribed,
        Self::AdditionalRequests,
    ];

    /// Wire name, shared by the JSON payload and server error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastName => "lastName",
            Self::FirstName => "firstName",
            Self::LastNameKana => "lastNameKana",
            Self::FirstNameKana => "firstNameKana",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ZipCode => "zipCode",
            Self::Address => "address",
            Self::Bio => "bio",
            Self::Motivation => "motivation",
            Self::Gender => "gender",
            Self::AgeGroup => "ageGroup",
            Self::Occupation => "occupation",
            Self::Education => "education",
            Self::Prefecture => "prefecture",
            Self::NearestStation => "nearestStation",
            Self::Interests => "interests",
            Self::Skills => "skills",
            Self::Certifications => "certifications",
            Self::Hobbies => "hobbies",
            Self::ContactTimeSlots => "contactTimeSlots",
            Self::EmergencyContactName => "emergencyContactName",
            Self::EmergencyContactPhone => "emergencyContactPhone",
            Self::SpecialNotes => "specialNotes",
            Self::AppealPoints => "appealPoints",
            Self::PreferredWorkLocation => "preferredWorkLocation",
            Self::PreferredJobType => "preferredJobType",
            Self::PrivacyPolicyAgreed => "privacyPolicyAgreed",
            Self::NewsletterSubscribed => "newsletterSubscribed",
            Self::AdditionalRequests => "additionalRequests",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::LastName => "Last name",
            Self::FirstName => "First name",
            Self::LastNameKana => "Last name (furigana)",
            Self::FirstNameKana => "First name (furigana)",
            Self::Email => "Email address",
            Self::Phone => "Phone number",
            Self::ZipCode => "Postal code",
            Self::Address => "Address",
            Self::Bio => "About you",
            Self::Motivation => "Motivation",
            Self::Gender => "Gender",
            Self::AgeGroup => "Age group",
            Self::Occupation => "Occupation",
            Self::Education => "Education",
            Self::Prefecture => "Prefecture",
            Self::NearestStation => "Nearest station",
            Self::Interests => "Interests",
            Self::Skills => "Skills",
            Self::Certifications => "Certifications",
            Self::Hobbies => "Hobbies",
            Self::ContactTimeSlots => "Preferred contact times",
            Self::EmergencyContactName => "Emergency contact name",
            Self::EmergencyContactPhone => "Emergency contact phone",
            Self::SpecialNotes => "Special notes",
            Self::AppealPoints => "Appeal points",
            Self::PreferredWorkLocation => "Preferred work location",
            Self::PreferredJobType => "Preferred job type",
            Self::PrivacyPolicyAgreed => "I agree to the privacy policy",
            Self::NewsletterSubscribed => "Subscribe to the newsletter",
            Self::AdditionalRequests => "Other requests or questions",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::LastName
            | Self::FirstName
            | Self::LastNameKana
            | Self::FirstNameKana
            | Self::Email
            | Self::Phone
            | Self::ZipCode
            | Self::Address
            | Self::Bio
            | Self::Motivation
            | Self::EmergencyContactName
            | Self::EmergencyContactPhone
            | Self::SpecialNotes
            | Self::AppealPoints
            | Self::AdditionalRequests => FieldKind::Text,
            Self::Gender
            | Self::AgeGroup
            | Self::Occupation
            | Self::Education
            | Self::Prefecture
            | Self::NearestStation
            | Self::PreferredWorkLocation
            | Self::PreferredJobType => FieldKind::Choice,
            Self::Interests
            | Self::Skills
            | Self::Certifications
            | Self::Hobbies
            | Self::ContactTimeSlots => FieldKind::Multi,
            Self::PrivacyPolicyAgreed | Self::NewsletterSubscribed => FieldKind::Flag,
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Self::LastName
            | Self::FirstName
            | Self::LastNameKana
            | Self::FirstNameKana
            | Self::Email
            | Self::Phone
            | Self::ZipCode
            | Self::Address
            | Self::Bio
            | Self::Motivation => Section::Basic,
            Self::Gender
            | Self::AgeGroup
            | Self::Occupation
            | Self::Education
            | Self::Prefecture
            | Self::NearestStation
            | Self::Interests
            | Self::Skills
            | Self::Certifications => Section::Selections,
            Self::Hobbies
            | Self::ContactTimeSlots
            | Self::EmergencyContactName
            | Self::EmergencyContactPhone
            | Self::SpecialNotes
            | Self::AppealPoints
            | Self::PreferredWorkLocation
            | Self::PreferredJobType => Section::Details,
            Self::PrivacyPolicyAgreed | Self::NewsletterSubscribed | Self::AdditionalRequests => {
                Section::Consent
            }
        }
    }

    /// Text fields rendered over several lines
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::Address
                | Self::Bio
                | Self::Motivation
                | Self::SpecialNotes
                | Self::AppealPoints
                | Self::AdditionalRequests
        )
    }

    /// Position in display order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choice(String),
    Multi(Vec<String>),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Choice(_) => FieldKind::Choice,
            Self::Multi(_) => FieldKind::Multi,
            Self::Flag(_) => FieldKind::Flag,
        }
    }
}

/// Borrowed view of a single field in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Text(&'a str),
    Choice(&'a str),
    Multi(&'a [String]),
    Flag(bool),
}

impl FieldRef<'_> {
    pub fn to_owned_value(&self) -> FieldValue {
        match *self {
            FieldRef::Text(s) => FieldValue::Text(s.to_string()),
            FieldRef::Choice(s) => FieldValue::Choice(s.to_string()),
            FieldRef::Multi(v) => FieldValue::Multi(v.to_vec()),
            FieldRef::Flag(b) => FieldValue::Flag(b),
        }
    }
}
