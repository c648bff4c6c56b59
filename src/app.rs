//! Application state and core logic

use crate::backend::{
    spawn_mock_server, ApiResponse, HttpBackend, MockServerHandle, RegistrationBackend,
    SubmitError,
};
use crate::config::AppConfig;
use crate::state::{
    AppState, FieldId, FieldKind, FieldRef, FieldValue, FocusTarget, FormError, FormRow,
    SubmissionController, SubmissionFailure, SubmissionOutcome, SubmitStart, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

type SubmitResult = Result<ApiResponse, SubmitError>;

/// Main application struct
pub struct App {
    /// Presentation state
    pub state: AppState,
    /// Form record, errors and submit phase
    pub controller: SubmissionController,
    backend: Arc<dyn RegistrationBackend>,
    /// Result of the submission currently in flight
    pending: Option<oneshot::Receiver<SubmitResult>>,
    /// Embedded endpoint, when no external one is configured
    mock_server: Option<MockServerHandle>,
    endpoint: String,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app, starting the embedded mock endpoint if none is configured
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let (endpoint, mock_server) = match config.resolved_endpoint() {
            Some(endpoint) => {
                tracing::info!(%endpoint, "using external registration endpoint");
                (endpoint, None)
            }
            None => {
                let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
                let server = spawn_mock_server(addr, config.mock_delay()).await?;
                tracing::info!(addr = %server.local_addr(), "using embedded mock endpoint");
                (server.endpoint(), Some(server))
            }
        };

        let backend = HttpBackend::new(endpoint);
        let endpoint = backend.endpoint().to_string();
        let mut app = Self::with_backend(Arc::new(backend), endpoint);
        app.mock_server = mock_server;
        Ok(app)
    }

    /// Create the app around an already-built backend
    pub fn with_backend(backend: Arc<dyn RegistrationBackend>, endpoint: impl Into<String>) -> Self {
        Self {
            state: AppState::default(),
            controller: SubmissionController::new(),
            backend,
            pending: None,
            mock_server: None,
            endpoint: endpoint.into(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn uses_mock_server(&self) -> bool {
        self.mock_server.is_some()
    }

    /// General error to show in the error dialog
    pub fn general_error(&self) -> Option<&str> {
        self.controller.errors().general_message()
    }

    /// Stop the embedded endpoint, if any
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(server) = self.mock_server.take() {
            server.shutdown().await?;
        }
        Ok(())
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.general_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.controller.dismiss_general_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Success => self.handle_success_key(key),
        }
        Ok(())
    }

    fn handle_success_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.controller.acknowledge() {
                    self.state.reset_form_view();
                    self.state.clear_status();
                }
            }
            KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.quit = true;
                return;
            }
            KeyCode::Char('s') if crate::platform::is_submit_modifier(key.modifiers) => {
                self.start_submit();
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.state.next_row();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.prev_row();
                return;
            }
            _ => {}
        }

        match self.state.active() {
            FormRow::Submit => {
                if key.code == KeyCode::Enter {
                    self.start_submit();
                }
            }
            FormRow::Field(id) => match id.kind() {
                FieldKind::Text => self.handle_text_key(id, key),
                FieldKind::Choice | FieldKind::Multi => self.handle_option_key(id, key),
                FieldKind::Flag => self.handle_flag_key(id, key),
            },
        }
    }

    fn handle_text_key(&mut self, id: FieldId, key: KeyEvent) {
        let result = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.push_char(id, c)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self
                .controller
                .set_field(id, FieldValue::Text(String::new())),
            KeyCode::Backspace => self.controller.pop_char(id),
            KeyCode::Enter if id.is_multiline() => self.controller.push_char(id, '\n'),
            KeyCode::Enter => {
                self.state.next_row();
                Ok(())
            }
            _ => Ok(()),
        };
        self.report(result);
    }

    fn handle_option_key(&mut self, id: FieldId, key: KeyEvent) {
        match key.code {
            KeyCode::Left => self.state.prev_option(),
            KeyCode::Right => self.state.next_option(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let Some((_, value)) = self.state.highlighted_option() else {
                    return;
                };
                let result = match self.controller.record().get(id) {
                    FieldRef::Multi(selected) => {
                        let included = !selected.iter().any(|v| v == value);
                        self.controller.set_multi(id, value, included)
                    }
                    _ => self
                        .controller
                        .set_field(id, FieldValue::Choice(value.to_string())),
                };
                self.report(result);
            }
            KeyCode::Delete | KeyCode::Backspace => {
                let cleared = match id.kind() {
                    FieldKind::Multi => FieldValue::Multi(Vec::new()),
                    _ => FieldValue::Choice(String::new()),
                };
                let result = self.controller.set_field(id, cleared);
                self.report(result);
            }
            _ => {}
        }
    }

    fn handle_flag_key(&mut self, id: FieldId, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
            let current = matches!(self.controller.record().get(id), FieldRef::Flag(true));
            let result = self.controller.set_field(id, FieldValue::Flag(!current));
            self.report(result);
        }
    }

    fn report(&mut self, result: Result<(), FormError>) {
        if let Err(e) = result {
            tracing::debug!("edit rejected: {e}");
            self.state.set_status(e.to_string());
        }
    }

    /// Validate and, if clean, send the record on a background task
    pub fn start_submit(&mut self) {
        match self.controller.begin_submit(&mut self.state) {
            SubmitStart::Dispatch(record) => {
                let backend = Arc::clone(&self.backend);
                let (tx, rx) = oneshot::channel();
                tokio::spawn(async move {
                    let result = backend.register(&record).await;
                    // Receiver is gone only if the app already exited.
                    let _ = tx.send(result);
                });
                self.pending = Some(rx);
                self.state.set_status("Submitting registration...");
            }
            SubmitStart::Blocked { .. } => {
                let count = self.controller.errors().len();
                self.state.set_status(format!(
                    "{count} field{} need attention",
                    if count == 1 { "" } else { "s" }
                ));
            }
            SubmitStart::Suppressed => {}
        }
    }

    /// Pick up the result of an in-flight submission.
    ///
    /// Returns true when a submission finished during this call.
    pub fn poll_submission(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(SubmitError::Transport(
                "submission task ended without a result".to_string(),
            )),
        };
        self.pending = None;
        self.finish_submit(result);
        true
    }

    fn finish_submit(&mut self, result: SubmitResult) {
        match self.controller.complete(result) {
            SubmissionOutcome::Success { .. } => {
                self.state.show_success();
                self.state.set_status("Registration complete");
            }
            SubmissionOutcome::Failure(SubmissionFailure::Fields(errors)) => {
                match errors.first_field() {
                    Some(field) => {
                        self.state.focus_field(field);
                        self.state
                            .set_status("The server rejected some fields; please review them");
                    }
                    None => self.state.clear_status(),
                }
            }
            SubmissionOutcome::Failure(SubmissionFailure::General(_)) => {
                self.state.clear_status();
            }
        }
    }
}
