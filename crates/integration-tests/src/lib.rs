//! Integration tests for Shopdesk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests
//! ```
//!
//! The admin router runs in-process against the in-memory store, so no
//! `MongoDB` server is needed. Requests go through the same middleware-free
//! router the binary mounts.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use shopdesk_admin::db::MemoryShippingMethodStore;
use shopdesk_admin::routes;
use shopdesk_admin::state::AppState;

/// Largest response body the helpers will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// An admin router wired to a fresh in-memory store.
pub struct TestApp {
    state: AppState<MemoryShippingMethodStore>,
}

/// Status and decoded body of a response.
///
/// `body` is `Value::Null` when the response was empty, or a string when it
/// was not JSON.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Create an app with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::new(MemoryShippingMethodStore::new()),
        }
    }

    /// The store behind the app, for asserting on side effects.
    #[must_use]
    pub fn store(&self) -> &MemoryShippingMethodStore {
        self.state.shipping_methods().store()
    }

    fn router(&self) -> Router {
        routes::routes::<MemoryShippingMethodStore>().with_state(self.state.clone())
    }

    /// Send a request with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("readable body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a shipping method and return its id.
    ///
    /// # Panics
    ///
    /// Panics if the create request fails.
    pub async fn create_method(&self, body: &Value) -> String {
        let response = self.post("/api/v1/shipping_methods", body).await;
        assert_eq!(response.status, StatusCode::OK, "create failed: {:?}", response.body);
        response.body["id"]
            .as_str()
            .expect("created method has an id")
            .to_owned()
    }
}
