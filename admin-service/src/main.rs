//! Admin service entry point.

use admin_service::config::AdminConfig;
use admin_service::startup::Application;
use service_core::observability::{init_metrics, init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AdminConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "admin-service",
        &config.server.log_level,
        config.server.otlp_endpoint.as_deref(),
    )?;
    init_metrics();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        max_connections = config.database.max_connections,
        "Starting admin-service"
    );

    let application = Application::build(config).await?;
    let result = application.run_until_stopped().await;

    shutdown_tracing();
    result.map_err(|e| {
        tracing::error!(error = %e, "Server error");
        anyhow::anyhow!("Server error: {}", e)
    })
}
