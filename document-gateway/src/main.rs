use document_gateway::config::get_configuration;
use document_gateway::services::backend_client::BackendClient;
use document_gateway::startup::build_router;
use document_gateway::AppState;
use service_core::lifecycle::shutdown_signal;
use service_core::observability::{init_metrics, init_tracing, shutdown_tracing};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "document-gateway",
        &configuration.server.log_level,
        configuration.server.otlp_endpoint.as_deref(),
    )?;
    init_metrics();

    info!(backend = %configuration.backend.base_url, "Forwarding to document backend");

    let backend = Arc::new(BackendClient::new(configuration.backend.clone()));
    let address = configuration.server.address();
    let app = build_router(AppState::new(backend, Arc::new(configuration)));

    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting document-gateway on {}", address);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    shutdown_tracing();
    served.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })
}
