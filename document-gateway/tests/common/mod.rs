//! Test helpers for document-gateway integration tests.
//!
//! Each test gets its own wiremock backend wired into the router.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use document_gateway::config::{BackendSettings, Settings};
use document_gateway::services::backend_client::BackendClient;
use document_gateway::startup::build_router;
use document_gateway::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

pub const SESSION_COOKIE: &str = "connect.sid=s%3Aabc123";
pub const ACCESS_TOKEN: &str = "test-access-token";

pub struct TestApp {
    pub backend: MockServer,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    /// Gateway wired to a fresh mock backend.
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;
        let router = router_for(&backend.uri());
        Self { backend, router }
    }

    pub async fn call(&self, request: Request<Body>) -> TestResponse {
        send(self.router.clone(), request).await
    }
}

pub fn router_for(base_url: &str) -> Router {
    let settings = Settings {
        backend: BackendSettings {
            base_url: base_url.to_string(),
            request_timeout_secs: Some(5),
        },
        ..Settings::default()
    };
    let backend = Arc::new(BackendClient::new(settings.backend.clone()));
    build_router(AppState::new(backend, Arc::new(settings)))
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.expect("router failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", SESSION_COOKIE)
        .body(Body::empty())
        .unwrap()
}

pub fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", SESSION_COOKIE)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn with_token(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("cookie", format!("token={}", ACCESS_TOKEN))
        .body(Body::empty())
        .unwrap()
}
