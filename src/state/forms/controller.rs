//! Submission controller: validate, send, interpret, reset-or-report

use super::error::FormError;
use super::field::{FieldId, FieldValue};
use super::form_state::{FormRecord, FormStore};
use super::validation::{has_validation_errors, validate, ErrorKey, ValidationErrorMap};
use crate::backend::{ApiResponse, SubmitError};

/// General message for a submission that got no usable response
pub const NETWORK_ERROR_MESSAGE: &str = "A network error occurred";

/// General message for a rejection that carries no message of its own
pub const DEFAULT_FAILURE_MESSAGE: &str = "Registration failed";

/// Receives the first invalid field when a submission is blocked.
///
/// The presentation layer decides what "focus" means.
#[cfg_attr(test, mockall::automock)]
pub trait FocusTarget {
    fn focus_field(&mut self, field: FieldId);
}

/// Where the session is in the submit cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    Succeeded {
        confirmation_id: String,
    },
}

/// Why a submission did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Per-field messages from the server
    Fields(ValidationErrorMap),
    /// One message for the whole form
    General(String),
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { confirmation_id: String },
    Failure(SubmissionFailure),
}

/// What [`SubmissionController::begin_submit`] decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Validation passed; send this record exactly once
    Dispatch(FormRecord),
    /// Validation failed; nothing is sent
    Blocked { first_invalid: Option<FieldId> },
    /// A submission is in flight or the success screen is showing
    Suppressed,
}

/// Owns the session's record, its displayed errors and the submit phase
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    store: FormStore,
    errors: ValidationErrorMap,
    phase: SubmissionPhase,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &FormRecord {
        self.store.record()
    }

    pub fn errors(&self) -> &ValidationErrorMap {
        &self.errors
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting)
    }

    /// Whether the submit control should be offered
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Editing)
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        match self.phase {
            SubmissionPhase::Submitting => Err(FormError::SubmissionInFlight),
            _ => Ok(()),
        }
    }

    /// Replace a field value and clear that field's displayed error
    pub fn set_field(&mut self, id: FieldId, value: FieldValue) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.store.set_field(id, value)?;
        self.errors.remove(ErrorKey::Field(id));
        Ok(())
    }

    /// Toggle a multi-choice value and clear that field's displayed error
    pub fn set_multi(&mut self, id: FieldId, value: &str, included: bool) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.store.set_multi(id, value, included)?;
        self.errors.remove(ErrorKey::Field(id));
        Ok(())
    }

    pub fn push_char(&mut self, id: FieldId, c: char) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.store.push_char(id, c)?;
        self.errors.remove(ErrorKey::Field(id));
        Ok(())
    }

    pub fn pop_char(&mut self, id: FieldId) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.store.pop_char(id)?;
        self.errors.remove(ErrorKey::Field(id));
        Ok(())
    }

    pub fn dismiss_general_error(&mut self) {
        self.errors.remove(ErrorKey::General);
    }

    /// Validate and, if clean, move to `Submitting`.
    ///
    /// On failure the error map is stored and `focus` receives the first
    /// invalid field in validation order.
    pub fn begin_submit(&mut self, focus: &mut dyn FocusTarget) -> SubmitStart {
        if !self.can_submit() {
            tracing::debug!(phase = ?self.phase, "submit suppressed");
            return SubmitStart::Suppressed;
        }

        let errors = validate(self.store.record());
        if has_validation_errors(&errors) {
            let first_invalid = errors.first_field();
            tracing::info!(
                invalid = errors.len(),
                first = ?first_invalid,
                "submission blocked by validation"
            );
            if let Some(field) = first_invalid {
                focus.focus_field(field);
            }
            self.errors = errors;
            return SubmitStart::Blocked { first_invalid };
        }

        self.errors.clear();
        self.phase = SubmissionPhase::Submitting;
        tracing::info!("submission started");
        SubmitStart::Dispatch(self.store.record().clone())
    }

    /// Apply the result of the network call started by `begin_submit`
    pub fn complete(&mut self, result: Result<ApiResponse, SubmitError>) -> SubmissionOutcome {
        if !self.is_submitting() {
            tracing::warn!(phase = ?self.phase, "completion arrived outside a submission");
        }

        let outcome = match result {
            Err(e) => {
                tracing::warn!("submission failed: {e}");
                SubmissionOutcome::Failure(SubmissionFailure::General(
                    NETWORK_ERROR_MESSAGE.to_string(),
                ))
            }
            Ok(response) if response.success => {
                let confirmation_id = response.id.unwrap_or_default();
                if confirmation_id.is_empty() {
                    tracing::warn!("success response carried no confirmation id");
                }
                SubmissionOutcome::Success { confirmation_id }
            }
            Ok(response) => {
                let wire_errors = response
                    .errors
                    .as_ref()
                    .filter(|errors| !errors.is_empty())
                    .map(ValidationErrorMap::from_wire)
                    .unwrap_or_default();
                if wire_errors.first_field().is_some() {
                    tracing::warn!(fields = wire_errors.len(), "server rejected registration");
                    SubmissionOutcome::Failure(SubmissionFailure::Fields(wire_errors))
                } else {
                    // Maps naming no field are shown like a plain message.
                    let message = match wire_errors.general_message() {
                        Some(general) => general.to_string(),
                        None if response.message.is_empty() => DEFAULT_FAILURE_MESSAGE.to_string(),
                        None => response.message,
                    };
                    tracing::warn!(%message, "server rejected registration");
                    SubmissionOutcome::Failure(SubmissionFailure::General(message))
                }
            }
        };

        match &outcome {
            SubmissionOutcome::Success { confirmation_id } => {
                tracing::info!(%confirmation_id, "registration succeeded");
                self.store.reset();
                self.errors.clear();
                self.phase = SubmissionPhase::Succeeded {
                    confirmation_id: confirmation_id.clone(),
                };
            }
            SubmissionOutcome::Failure(SubmissionFailure::Fields(map)) => {
                self.errors = map.clone();
                self.phase = SubmissionPhase::Editing;
            }
            SubmissionOutcome::Failure(SubmissionFailure::General(message)) => {
                self.errors = ValidationErrorMap::general(message.clone());
                self.phase = SubmissionPhase::Editing;
            }
        }

        outcome
    }

    /// Leave the success screen for a fresh form.
    ///
    /// Returns false when there was nothing to acknowledge.
    pub fn acknowledge(&mut self) -> bool {
        if !matches!(self.phase, SubmissionPhase::Succeeded { .. }) {
            return false;
        }
        self.store.reset();
        self.errors.clear();
        self.phase = SubmissionPhase::Editing;
        true
    }

    /// Run a whole submit cycle against `backend`.
    ///
    /// Returns `None` when nothing was sent. The app drives the same cycle
    /// through `begin_submit` and `complete` so the call can run off the UI
    /// task.
    #[cfg(test)]
    pub async fn submit(
        &mut self,
        backend: &dyn crate::backend::RegistrationBackend,
        focus: &mut dyn FocusTarget,
    ) -> Option<SubmissionOutcome> {
        match self.begin_submit(focus) {
            SubmitStart::Dispatch(record) => {
                let result = backend.register(&record).await;
                Some(self.complete(result))
            }
            SubmitStart::Blocked { .. } | SubmitStart::Suppressed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockRegistrationBackend;
    use crate::state::forms::validation::fixtures::complete_record;
    use mockall::predicate::eq;
    use std::collections::BTreeMap;

    /// Focus sink that ignores calls
    struct NoFocus;

    impl FocusTarget for NoFocus {
        fn focus_field(&mut self, _field: FieldId) {}
    }

    fn filled_controller() -> SubmissionController {
        let mut controller = SubmissionController::new();
        let record = complete_record();
        for id in FieldId::ALL {
            controller
                .set_field(id, record.get(id).to_owned_value())
                .unwrap();
        }
        controller
    }

    fn accepted(id: &str) -> ApiResponse {
        ApiResponse::accepted(id.to_string(), "ok")
    }

    mod blocking {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_missing_last_name_blocks_without_network_call() {
            let mut controller = filled_controller();
            controller
                .set_field(FieldId::LastName, FieldValue::Text(String::new()))
                .unwrap();

            let mut backend = MockRegistrationBackend::new();
            backend.expect_register().times(0);
            let mut focus = MockFocusTarget::new();
            focus
                .expect_focus_field()
                .with(eq(FieldId::LastName))
                .times(1)
                .return_const(());

            let outcome = controller.submit(&backend, &mut focus).await;

            assert!(outcome.is_none());
            assert_eq!(controller.phase(), &SubmissionPhase::Editing);
            assert_eq!(
                controller.errors().keys().collect::<Vec<_>>(),
                vec![ErrorKey::Field(FieldId::LastName)]
            );
        }

        #[test]
        fn test_empty_form_focuses_first_rule() {
            let mut controller = SubmissionController::new();
            let mut focus = MockFocusTarget::new();
            focus
                .expect_focus_field()
                .with(eq(FieldId::LastName))
                .times(1)
                .return_const(());

            let start = controller.begin_submit(&mut focus);
            assert_eq!(
                start,
                SubmitStart::Blocked {
                    first_invalid: Some(FieldId::LastName)
                }
            );
            assert_eq!(controller.errors().len(), 19);
        }

        #[test]
        fn test_empty_interests_blocks() {
            let mut controller = filled_controller();
            controller
                .set_multi(FieldId::Interests, "programming", false)
                .unwrap();
            let start = controller.begin_submit(&mut NoFocus);
            assert_eq!(
                start,
                SubmitStart::Blocked {
                    first_invalid: Some(FieldId::Interests)
                }
            );
        }

        #[test]
        fn test_editing_clears_field_error() {
            let mut controller = SubmissionController::new();
            controller.begin_submit(&mut NoFocus);
            assert!(controller.errors().field(FieldId::Email).is_some());

            controller.push_char(FieldId::Email, 'a').unwrap();
            assert!(controller.errors().field(FieldId::Email).is_none());
            assert!(controller.errors().field(FieldId::Phone).is_some());
        }
    }

    mod success {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_record_is_sent_once_and_store_resets() {
            let mut controller = filled_controller();
            let expected = controller.record().clone();

            let mut backend = MockRegistrationBackend::new();
            backend
                .expect_register()
                .withf(move |record| *record == expected)
                .times(1)
                .returning(|_| Ok(accepted("member_1_abcdefghi")));

            let outcome = controller.submit(&backend, &mut NoFocus).await;

            assert_eq!(
                outcome,
                Some(SubmissionOutcome::Success {
                    confirmation_id: "member_1_abcdefghi".to_string()
                })
            );
            assert_eq!(controller.record(), &FormRecord::default());
            assert!(controller.errors().is_empty());
            assert!(matches!(
                controller.phase(),
                SubmissionPhase::Succeeded { confirmation_id } if !confirmation_id.is_empty()
            ));
        }

        #[test]
        fn test_acknowledge_returns_to_fresh_editing() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            controller.complete(Ok(accepted("m-1")));

            assert!(!controller.can_submit());
            assert!(controller.acknowledge());
            assert_eq!(controller.phase(), &SubmissionPhase::Editing);
            assert_eq!(controller.record(), &FormRecord::default());
            assert!(!controller.acknowledge());
        }

        #[test]
        fn test_submit_suppressed_on_success_screen() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            controller.complete(Ok(accepted("m-1")));
            assert_eq!(controller.begin_submit(&mut NoFocus), SubmitStart::Suppressed);
        }
    }

    mod failure {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_transport_error_keeps_record() {
            let mut controller = filled_controller();
            let before = controller.record().clone();

            let mut backend = MockRegistrationBackend::new();
            backend
                .expect_register()
                .times(1)
                .returning(|_| Err(SubmitError::Transport("connection refused".into())));

            let outcome = controller.submit(&backend, &mut NoFocus).await;

            assert_eq!(
                outcome,
                Some(SubmissionOutcome::Failure(SubmissionFailure::General(
                    NETWORK_ERROR_MESSAGE.to_string()
                )))
            );
            assert_eq!(controller.phase(), &SubmissionPhase::Editing);
            assert_eq!(controller.record(), &before);
            assert_eq!(controller.errors(), &ValidationErrorMap::general(NETWORK_ERROR_MESSAGE));
        }

        #[test]
        fn test_malformed_response_is_network_error() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            controller.complete(Err(SubmitError::MalformedResponse("eof".into())));
            assert_eq!(controller.errors().general_message(), Some(NETWORK_ERROR_MESSAGE));
        }

        #[test]
        fn test_field_errors_adopted_verbatim() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            let response = ApiResponse {
                success: false,
                message: "validation failed".into(),
                id: None,
                errors: Some(BTreeMap::from([(
                    "email".to_string(),
                    "Email already registered".to_string(),
                )])),
            };

            let outcome = controller.complete(Ok(response));

            assert!(matches!(
                outcome,
                SubmissionOutcome::Failure(SubmissionFailure::Fields(_))
            ));
            assert_eq!(
                controller.errors().field(FieldId::Email),
                Some("Email already registered")
            );
            assert_eq!(controller.errors().len(), 1);
            assert!(controller.can_submit());
        }

        #[test]
        fn test_rejection_message_becomes_general_error() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            controller.complete(Ok(ApiResponse::rejected("Registration closed")));
            assert_eq!(controller.errors().general_message(), Some("Registration closed"));
        }

        #[test]
        fn test_rejection_without_message_uses_default() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            let response = ApiResponse {
                errors: Some(BTreeMap::new()),
                ..ApiResponse::rejected("")
            };
            controller.complete(Ok(response));
            assert_eq!(
                controller.errors().general_message(),
                Some(DEFAULT_FAILURE_MESSAGE)
            );
        }

        #[test]
        fn test_errors_without_fields_become_general() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            let response = ApiResponse {
                errors: Some(BTreeMap::from([(
                    "general".to_string(),
                    "Registration is closed".to_string(),
                )])),
                ..ApiResponse::rejected("validation failed")
            };

            let outcome = controller.complete(Ok(response));

            assert_eq!(
                outcome,
                SubmissionOutcome::Failure(SubmissionFailure::General(
                    "Registration is closed".to_string()
                ))
            );
            assert_eq!(
                controller.errors(),
                &ValidationErrorMap::general("Registration is closed")
            );
        }

        #[test]
        fn test_resubmit_after_failure() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            controller.complete(Err(SubmitError::Transport("offline".into())));

            let start = controller.begin_submit(&mut NoFocus);
            assert!(matches!(start, SubmitStart::Dispatch(_)));
            assert!(controller.errors().is_empty());
        }
    }

    mod reentrancy {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_second_submit_suppressed_while_in_flight() {
            let mut controller = filled_controller();
            assert!(matches!(
                controller.begin_submit(&mut NoFocus),
                SubmitStart::Dispatch(_)
            ));
            assert!(controller.is_submitting());
            assert_eq!(controller.begin_submit(&mut NoFocus), SubmitStart::Suppressed);
        }

        #[test]
        fn test_edits_locked_while_in_flight() {
            let mut controller = filled_controller();
            controller.begin_submit(&mut NoFocus);
            let before = controller.record().clone();

            assert_eq!(
                controller.push_char(FieldId::Bio, 'x'),
                Err(FormError::SubmissionInFlight)
            );
            assert_eq!(
                controller.set_multi(FieldId::Skills, "sql", true),
                Err(FormError::SubmissionInFlight)
            );
            assert_eq!(controller.record(), &before);
        }

        #[test]
        fn test_dispatch_carries_full_record() {
            let mut controller = filled_controller();
            controller
                .set_field(FieldId::Bio, FieldValue::Text("Hello".into()))
                .unwrap();
            match controller.begin_submit(&mut NoFocus) {
                SubmitStart::Dispatch(record) => assert_eq!(&record, controller.record()),
                other => panic!("expected dispatch, got {other:?}"),
            }
        }
    }
}
