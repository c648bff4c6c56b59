//! Registration backend: HTTP client, trait seam and mock server

mod client;
mod server;
mod traits;
mod wire;

pub use client::{HttpBackend, ENDPOINT_ENV};
pub use server::{spawn_mock_server, MockDelay, MockServerHandle};
pub use traits::{RegistrationBackend, SubmitError};
pub use wire::ApiResponse;

#[cfg(test)]
pub use traits::MockRegistrationBackend;
