//! Form store errors

use super::field::{FieldId, FieldKind};
use thiserror::Error;

/// Misuse of the form store API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` holds a {} value, got {}", .expected.label(), .actual.label())]
    KindMismatch {
        field: FieldId,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("a submission is in flight; edits are locked")]
    SubmissionInFlight,
}
