use crate::extract::SessionCaller;
use crate::models::user::{user_list, UserSummary};
use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    Json,
};
use reqwest::Method;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// Users for pickers such as the share dialog, flattened for display.
pub async fn list_users(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope<Vec<UserSummary>>>, AppError> {
    let request = caller
        .request("users.list", Method::GET, "/api/users")
        .query(query);
    let envelope = state
        .backend
        .envelope(request, "Failed to fetch users")
        .await?;

    let pagination = envelope.pagination;
    let users = user_list(envelope.data.unwrap_or_default())
        .map_err(|e| AppError::Transport(format!("Unexpected user listing from backend: {}", e)))?;

    Ok(Json(ProxyEnvelope::success(users).with_pagination(pagination)))
}
