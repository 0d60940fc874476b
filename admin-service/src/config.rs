use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    #[serde(default)]
    pub server: core_config::Config,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 secret shared with whoever issues the access tokens.
    pub jwt_secret: Secret<String>,
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,
}

fn default_token_cookie() -> String {
    "token".to_string()
}

impl AdminConfig {
    /// Load from `config/base.yaml` and `APP_*` variables. The conventional
    /// `DATABASE_URL` and `JWT_SECRET` variables win when set.
    pub fn load() -> Result<Self, AppError> {
        let settings = core_config::builder("admin-service")?
            .set_default("server.port", 3002)?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.jwt_secret", std::env::var("JWT_SECRET").ok())?
            .build()?;

        Ok(settings.try_deserialize::<AdminConfig>()?)
    }
}
