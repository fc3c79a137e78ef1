//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use forge_infra::{ApiClient, AuthenticationClient, Clock, OAuthTokenProvider, StaticTokenProvider};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STATIC_TOKEN: &str = "static-token";

/// Route `tracing` output through the test harness; `RUST_LOG` selects levels
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Dispatcher for `server` authenticated with [`STATIC_TOKEN`]
pub fn static_api(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), Arc::new(StaticTokenProvider::new(STATIC_TOKEN)))
        .expect("api client should build")
}

/// Successful `/authenticate` response body
pub fn token_body(access_token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": expires_in
    })
}

/// Mount `/authenticate` answering with `access_token`, expecting `calls` hits
pub async fn mount_authenticate(server: &MockServer, access_token: &str, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/authenticate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(access_token, 3599)))
        .expect(calls)
        .mount(server)
        .await;
}

/// Client-credentials provider authenticating against `server`
pub fn oauth_provider(server: &MockServer) -> OAuthTokenProvider {
    let auth_client =
        AuthenticationClient::new(server.uri()).expect("authentication client should build");
    OAuthTokenProvider::with_client(auth_client, "client-id", "client-secret")
}

/// Manually advanced clock
#[derive(Clone)]
pub struct TestClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(Utc::now())) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += by;
    }

    pub fn clock(&self) -> Clock {
        let now = Arc::clone(&self.now);
        Arc::new(move || *now.lock().expect("clock mutex poisoned"))
    }
}
