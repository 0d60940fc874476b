use crate::extract::SessionCaller;
use crate::AppState;
use axum::{extract::State, Json};
use reqwest::Method;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// Exchange the session for a short-lived token the browser uses to open
/// its notification socket.
pub async fn socket_token(
    State(state): State<AppState>,
    caller: SessionCaller,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let request = caller.request("auth.socket_token", Method::GET, "/api/auth/socket-token");
    let envelope = state
        .backend
        .envelope(request, "Failed to get socket token")
        .await?;
    Ok(Json(envelope))
}
