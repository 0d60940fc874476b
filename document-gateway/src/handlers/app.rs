use axum::http::header;
use axum::response::IntoResponse;
use service_core::error::AppError;
use service_core::observability::render_metrics;

/// Liveness check; never touches the backend.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Prometheus scrape endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        render_metrics(),
    )
}

/// Unknown routes get the same error envelope as everything else.
pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Route not found"))
}
