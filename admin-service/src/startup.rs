//! Application startup and lifecycle management.

use crate::config::AdminConfig;
use crate::handlers::{
    counts::{department_count, document_action_count, document_type_count, user_count},
    health::{health_check, metrics_handler},
};
use crate::middleware::auth::auth_middleware;
use crate::services::{CountService, Database};
use crate::AppState;
use axum::{middleware, routing::get, Router};
use secrecy::ExposeSecret;
use service_core::auth::TokenVerifier;
use service_core::error::AppError;
use service_core::lifecycle::shutdown_signal;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

impl AppState {
    pub fn new(config: AdminConfig, counts: CountService) -> Self {
        Self {
            verifier: Arc::new(TokenVerifier::new(&config.auth.jwt_secret)),
            counts: Arc::new(counts),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/departments", get(department_count))
        .route("/document-types", get(document_type_count))
        .route("/document-actions", get(document_action_count))
        .route("/users", get(user_count))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/admin/counts", admin)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    database: Database,
    state: AppState,
}

impl Application {
    pub async fn build(config: AdminConfig) -> Result<Self, AppError> {
        let database = Database::new(
            config.database.url.expose_secret(),
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        let address = config.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, addr = %address, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let counts = CountService::new(Arc::new(database.clone()));
        let state = AppState::new(config, counts);

        tracing::info!(port = port, "Admin service listener bound");

        Ok(Self {
            port,
            listener,
            database,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM, then close the pool.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!(
            service = "admin-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        let served = axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        self.database.close().await;
        served
    }
}
