pub mod config;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod proxy;
pub mod services;
pub mod startup;

use config::Settings;
use services::backend_client::BackendClient;
use std::sync::Arc;

/// Shared application state: the backend forwarder and the loaded settings.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(backend: Arc<BackendClient>, settings: Arc<Settings>) -> Self {
        Self { backend, settings }
    }
}
