//! Mock registration endpoint served with axum
//!
//! Accepts any JSON body on `POST /api/register`, waits a random interval,
//! logs what it received and answers with a fresh confirmation id. Nothing is
//! validated or stored.

use super::client::REGISTER_PATH;
use super::wire::ApiResponse;
use anyhow::{Context, Result};
use axum::{
    body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router,
};
use chrono::Utc;
use rand::Rng;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use uuid::Uuid;

pub const DEFAULT_DELAY_MIN_MS: u64 = 500;
pub const DEFAULT_DELAY_MAX_MS: u64 = 2500;

const SUCCESS_MESSAGE: &str = "Member registration completed successfully";

/// Bounds of the artificial processing delay, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDelay {
    min_ms: u64,
    max_ms: u64,
}

impl MockDelay {
    /// Bounds are reordered if given backwards
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    pub fn bounds(&self) -> (u64, u64) {
        (self.min_ms, self.max_ms)
    }

    fn sample(&self) -> Duration {
        let ms = if self.min_ms == self.max_ms {
            self.min_ms
        } else {
            rand::thread_rng().gen_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(ms)
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MIN_MS, DEFAULT_DELAY_MAX_MS)
    }
}

/// Build the registration router.
///
/// Routes:
/// - POST /api/register -> 200 with a confirmation id
/// - any other method   -> 405 `{success: false}`
fn build_router(delay: MockDelay) -> Router {
    Router::new()
        .route(
            REGISTER_PATH,
            post(register).fallback(method_not_allowed),
        )
        .with_state(delay)
}

async fn register(State(delay): State<MockDelay>, body: Bytes) -> (StatusCode, Json<ApiResponse>) {
    let record: Value = match serde_json::from_slice(&body) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("rejecting registration with unreadable body: {e}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::rejected("Invalid request body")),
            );
        }
    };

    tokio::time::sleep(delay.sample()).await;

    let id = confirmation_id();
    log_registration(&record, &id);

    (
        StatusCode::OK,
        Json(ApiResponse::accepted(id, SUCCESS_MESSAGE)),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::rejected("Method not allowed")),
    )
}

/// `member_<unix millis>_<9 random chars>`
fn confirmation_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("member_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// Subset of `record` restricted to `keys`; missing keys are skipped
fn pick(record: &Value, keys: &[&str]) -> Value {
    let mut out = Map::new();
    for key in keys {
        if let Some(v) = record.get(*key) {
            out.insert((*key).to_string(), v.clone());
        }
    }
    Value::Object(out)
}

fn log_registration(record: &Value, id: &str) {
    tracing::info!(
        id,
        basic = %pick(
            record,
            &[
                "lastName",
                "firstName",
                "lastNameKana",
                "firstNameKana",
                "email",
                "phone",
                "zipCode",
                "address",
            ],
        ),
        "registration received"
    );
    tracing::info!(
        id,
        selections = %pick(
            record,
            &[
                "gender",
                "ageGroup",
                "occupation",
                "education",
                "prefecture",
                "nearestStation",
                "interests",
                "skills",
                "certifications",
            ],
        ),
        details = %pick(
            record,
            &[
                "hobbies",
                "contactTimeSlots",
                "emergencyContactName",
                "emergencyContactPhone",
                "preferredWorkLocation",
                "preferredJobType",
            ],
        ),
        "registration choices"
    );
    tracing::info!(
        id,
        consent = %pick(record, &["privacyPolicyAgreed", "newsletterSubscribed"]),
        free_text = %pick(
            record,
            &["bio", "motivation", "specialNotes", "appealPoints", "additionalRequests"],
        ),
        "registration consent and notes"
    );
}

/// Running mock server
pub struct MockServerHandle {
    join: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
}

impl MockServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Full URL of the registration route
    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.local_addr, REGISTER_PATH)
    }

    /// Stop accepting connections and wait for the server task to exit
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Receiver may already be gone if the server failed.
            let _ = tx.send(());
        }
        self.join
            .await
            .context("mock registration server task failed")
    }
}

/// Start the mock server on `addr` (port 0 picks a free port)
pub async fn spawn_mock_server(addr: SocketAddr, delay: MockDelay) -> Result<MockServerHandle> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding mock registration server at {addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("reading mock registration server address")?;

    let app = build_router(delay);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });

        if let Err(err) = server.await {
            tracing::error!("mock registration server error: {err:?}");
        }
    });

    let (min_ms, max_ms) = delay.bounds();
    tracing::info!(%local_addr, min_ms, max_ms, "mock registration server listening");

    Ok(MockServerHandle {
        join,
        shutdown_tx: Some(shutdown_tx),
        local_addr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{HttpBackend, RegistrationBackend};
    use crate::state::FormRecord;

    async fn start() -> MockServerHandle {
        spawn_mock_server("127.0.0.1:0".parse().unwrap(), MockDelay::none())
            .await
            .unwrap()
    }

    mod delay {
        use super::*;

        #[test]
        fn test_bounds_are_ordered() {
            assert_eq!(MockDelay::new(900, 100).bounds(), (100, 900));
        }

        #[test]
        fn test_default_bounds() {
            assert_eq!(MockDelay::default().bounds(), (500, 2500));
        }

        #[test]
        fn test_sample_within_bounds() {
            let delay = MockDelay::new(10, 20);
            for _ in 0..50 {
                let d = delay.sample();
                assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
            }
            assert_eq!(MockDelay::none().sample(), Duration::ZERO);
        }
    }

    mod ids {
        use super::*;

        #[test]
        fn test_confirmation_id_shape() {
            let id = confirmation_id();
            let parts: Vec<_> = id.split('_').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "member");
            assert!(parts[1].parse::<i64>().is_ok());
            assert_eq!(parts[2].len(), 9);
        }

        #[test]
        fn test_confirmation_ids_are_unique() {
            assert_ne!(confirmation_id(), confirmation_id());
        }

        #[test]
        fn test_pick_skips_missing_keys() {
            let record = serde_json::json!({"email": "a@b.c", "phone": "1"});
            assert_eq!(
                pick(&record, &["email", "zipCode"]),
                serde_json::json!({"email": "a@b.c"})
            );
        }
    }

    mod http {
        use super::*;

        #[tokio::test]
        async fn test_post_returns_confirmation() {
            let server = start().await;
            let response = reqwest::Client::new()
                .post(server.endpoint())
                .json(&serde_json::json!({"lastName": "Suzuki"}))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);

            let body: ApiResponse = response.json().await.unwrap();
            assert!(body.success);
            assert_eq!(body.message, SUCCESS_MESSAGE);
            assert!(body.id.unwrap().starts_with("member_"));
            server.shutdown().await.unwrap();
        }

        #[tokio::test]
        async fn test_get_is_method_not_allowed() {
            let server = start().await;
            let response = reqwest::get(server.endpoint()).await.unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

            let body: ApiResponse = response.json().await.unwrap();
            assert_eq!(body, ApiResponse::rejected("Method not allowed"));
            server.shutdown().await.unwrap();
        }

        #[tokio::test]
        async fn test_non_json_body_is_rejected() {
            let server = start().await;
            let response = reqwest::Client::new()
                .post(server.endpoint())
                .body("not json")
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

            let body: ApiResponse = response.json().await.unwrap();
            assert!(!body.success);
            server.shutdown().await.unwrap();
        }

        #[tokio::test]
        async fn test_http_backend_round_trip() {
            let server = start().await;
            let backend = HttpBackend::new(server.endpoint());

            let first = backend.register(&FormRecord::default()).await.unwrap();
            let second = backend.register(&FormRecord::default()).await.unwrap();

            assert!(first.success && second.success);
            assert_ne!(first.id, second.id);
            server.shutdown().await.unwrap();
        }

        #[tokio::test]
        async fn test_backend_reads_rejection_body() {
            let server = start().await;
            // Wrong path on the same server yields a non-JSON 404 body.
            let backend = HttpBackend::new(format!("http://{}/missing", server.local_addr()));
            let err = backend.register(&FormRecord::default()).await.unwrap_err();
            assert!(matches!(err, crate::backend::SubmitError::MalformedResponse(_)));
            server.shutdown().await.unwrap();
        }

        #[tokio::test]
        async fn test_shutdown_reports_failed_task() {
            let server = start().await;
            server.join.abort();
            let err = server.shutdown().await.unwrap_err();
            assert!(err.to_string().contains("mock registration server task failed"));
        }
    }
}
