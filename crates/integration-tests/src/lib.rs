//! Integration tests for Fashion Forward.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fashion-forward-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state across store instances and backends
//! - `http_flows` - Storefront routes driven in-process through the router
//!
//! Everything runs in-process; no server or external service is needed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use fashion_forward_storefront::config::StorefrontConfig;
use fashion_forward_storefront::routes;
use fashion_forward_storefront::state::AppState;
use fashion_forward_storefront::storage::{MemoryStorage, SharedStorage};
use tower::ServiceExt;

/// Response pieces the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A storefront wired to in-memory storage.
pub struct TestApp {
    pub state: AppState,
    pub storage: Arc<MemoryStorage>,
    router: Router,
}

impl TestApp {
    /// Storefront with default config and an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// Storefront over existing storage, restoring whatever cart it holds.
    #[must_use]
    pub fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        let shared: SharedStorage = Arc::clone(&storage) as SharedStorage;
        let state = AppState::with_storage(StorefrontConfig::default(), shared);
        let router = routes::app(state.clone());
        Self {
            state,
            storage,
            router,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("valid request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
