use crate::envelope::{GENERIC_ERROR_MESSAGE, ProxyEnvelope};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(anyhow::Error),

    #[error("Forbidden: {0}")]
    Forbidden(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    /// The backend answered with a non-2xx status.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        status: StatusCode,
        message: String,
        details: Option<Value>,
    },

    /// The backend could not be reached or its answer could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { status, .. } => *status,
            AppError::Transport(_)
            | AppError::DatabaseError(_)
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown to the user. Internal and configuration errors are
    /// masked; everything else carries its own message.
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => validation_message(errors),
            AppError::BadRequest(err)
            | AppError::Unauthorized(err)
            | AppError::Forbidden(err)
            | AppError::NotFound(err)
            | AppError::DatabaseError(err) => err.to_string(),
            AppError::Upstream { message, .. } => message.clone(),
            AppError::Transport(message) => message.clone(),
            AppError::ConfigError(_) => "Configuration error".to_string(),
            AppError::InternalError(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Flatten field errors into one sentence, preferring the declared messages.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, error.code),
            })
        })
        .collect();

    if messages.is_empty() {
        return "Validation error".to_string();
    }
    messages.sort();
    messages.join("; ")
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        let message = self.public_message();
        let details = match self {
            AppError::Upstream { details, .. } => details,
            _ => None,
        };

        (status, Json(ProxyEnvelope::<Value>::failure(message, details))).into_response()
    }
}
