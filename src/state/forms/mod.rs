//! Form domain layer
//!
//! Field identities, the record and its store, validation rules and the
//! submission controller. Nothing in here knows about the terminal.

mod controller;
mod error;
mod field;
mod form_state;
mod validation;

pub use controller::{
    FocusTarget, SubmissionController, SubmissionFailure, SubmissionOutcome, SubmissionPhase,
    SubmitStart, DEFAULT_FAILURE_MESSAGE, NETWORK_ERROR_MESSAGE,
};
pub use error::FormError;
pub use field::{FieldId, FieldKind, FieldRef, FieldValue, Section};
pub use form_state::{FormRecord, FormStore};
pub use validation::{
    has_validation_errors, is_required, validate, ErrorKey, ValidationErrorMap, GENERAL_KEY,
};

#[cfg(test)]
pub use controller::MockFocusTarget;

#[cfg(test)]
pub(crate) use validation::fixtures;
