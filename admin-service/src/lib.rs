pub mod config;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod startup;

use config::AdminConfig;
use service_core::auth::TokenVerifier;
use services::counts::CountService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub counts: Arc<CountService>,
    pub verifier: Arc<TokenVerifier>,
    pub config: Arc<AdminConfig>,
}
