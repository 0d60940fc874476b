//! Test helpers for admin-service integration tests.
//!
//! Routers run against an in-memory count repository; tokens are minted
//! with the test secret.

#![allow(dead_code)]

use admin_service::config::{AdminConfig, AuthConfig, DatabaseConfig};
use admin_service::services::{CountRepository, CountService, CountedTable};
use admin_service::startup::build_router;
use admin_service::AppState;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::Secret;
use serde_json::{json, Value};
use service_core::config::Config;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "admin-test-secret";

/// In-memory repository. `None` simulates a broken data layer.
pub struct FakeRepository {
    counts: Option<HashMap<CountedTable, i64>>,
}

impl FakeRepository {
    pub fn with_counts(counts: &[(CountedTable, i64)]) -> Self {
        Self {
            counts: Some(counts.iter().copied().collect()),
        }
    }

    pub fn failing() -> Self {
        Self { counts: None }
    }
}

#[async_trait]
impl CountRepository for FakeRepository {
    async fn count(&self, table: CountedTable) -> Result<i64, AppError> {
        match &self.counts {
            Some(counts) => Ok(counts.get(&table).copied().unwrap_or(0)),
            None => Err(AppError::DatabaseError(anyhow::anyhow!(
                "connection refused while counting \"{}\"",
                table.table_name()
            ))),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        match self.counts {
            Some(_) => Ok(()),
            None => Err(AppError::DatabaseError(anyhow::anyhow!("connection refused"))),
        }
    }
}

pub fn test_config() -> AdminConfig {
    AdminConfig {
        server: Config::default(),
        database: DatabaseConfig {
            url: Secret::new("postgres://unused".to_string()),
            max_connections: 1,
            min_connections: 0,
        },
        auth: AuthConfig {
            jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
            token_cookie: "token".to_string(),
        },
    }
}

pub fn test_router(repository: FakeRepository) -> Router {
    let counts = CountService::new(Arc::new(repository));
    build_router(AppState::new(test_config(), counts))
}

pub fn token(role: &str, permissions: &[&str]) -> String {
    let claims = json!({
        "sub": "admin-1",
        "role": role,
        "permissions": permissions,
        "exp": 4_000_000_000u64,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn authorized(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}
