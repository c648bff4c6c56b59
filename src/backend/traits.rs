//! Trait abstraction for the registration backend to enable mocking in tests

use super::wire::ApiResponse;
use crate::state::FormRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a usable response from the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No response was received
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body could not be read
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Registration endpoint operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// Send the full record; any well-formed reply, success or not, is `Ok`
    async fn register(&self, record: &FormRecord) -> Result<ApiResponse, SubmitError>;
}
