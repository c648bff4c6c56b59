//! HTTP client for the registration endpoint
//!
//! Posts the form record as JSON and reads back an [`ApiResponse`], whatever
//! the HTTP status.

use super::traits::{RegistrationBackend, SubmitError};
use super::wire::ApiResponse;
use crate::state::FormRecord;
use async_trait::async_trait;

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "MEMBER_FORM_ENDPOINT";

/// Path of the registration route on the mock server
pub const REGISTER_PATH: &str = "/api/register";

/// Client for a registration endpoint reachable over HTTP
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    /// Create a client for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationBackend for HttpBackend {
    async fn register(&self, record: &FormRecord) -> Result<ApiResponse, SubmitError> {
        tracing::info!(endpoint = %self.endpoint, "posting registration");

        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let parsed: ApiResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%status, "unreadable registration response: {e}");
            SubmitError::MalformedResponse(format!("HTTP {status}: {e}"))
        })?;

        tracing::info!(%status, success = parsed.success, "registration response received");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let backend = HttpBackend::new("http://127.0.0.1:9/api/register");
        let err = backend.register(&FormRecord::default()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[test]
    fn test_endpoint_accessor() {
        let backend = HttpBackend::new("http://localhost:3000/api/register");
        assert_eq!(backend.endpoint(), "http://localhost:3000/api/register");
    }
}
