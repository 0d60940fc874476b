use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

/// Environment variable the browser app uses for the backend base URL.
/// When set it wins over `APP_BACKEND__BASE_URL` and the config file.
pub const BACKEND_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: core_config::Config,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Upper bound for one forwarded call. Unset means the HTTP client's
    /// own behaviour applies.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            request_timeout_secs: None,
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:3001".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    /// Cookie holding the access token for bearer-gated endpoints.
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_cookie: default_token_cookie(),
        }
    }
}

fn default_token_cookie() -> String {
    "token".to_string()
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let settings = core_config::builder("document-gateway")?
        .set_default("server.port", 3000)?
        .set_override_option("backend.base_url", std::env::var(BACKEND_URL_ENV).ok())?
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}
