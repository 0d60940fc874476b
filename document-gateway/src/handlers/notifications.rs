use crate::extract::{BearerCaller, JsonBody};
use crate::proxy::segment;
use crate::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use reqwest::Method;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// The caller's notifications, paginated by the backend.
pub async fn list_notifications(
    State(state): State<AppState>,
    caller: BearerCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let request = caller
        .request("notifications.list", Method::GET, "/api/notifications")
        .query(query);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to fetch notifications")
            .await?,
    ))
}

/// Usually `{read: true}`; the body is forwarded as sent.
pub async fn update_notification(
    State(state): State<AppState>,
    caller: BearerCaller,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/notifications/{}", segment(&id)?);
    let request = caller
        .request("notifications.update", Method::PATCH, path)
        .json(body);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to update notification")
            .await?,
    ))
}

/// Delete one notification.
pub async fn delete_notification(
    State(state): State<AppState>,
    caller: BearerCaller,
    Path(id): Path<String>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/notifications/{}", segment(&id)?);
    let request = caller.request("notifications.delete", Method::DELETE, path);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to delete notification")
            .await?,
    ))
}

/// Mark every notification as read.
pub async fn mark_all_read(
    State(state): State<AppState>,
    caller: BearerCaller,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let request = caller.request(
        "notifications.read_all",
        Method::PATCH,
        "/api/notifications/read-all",
    );
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to mark notifications as read")
            .await?,
    ))
}
