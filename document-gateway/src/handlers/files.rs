//! File checkout locks. These endpoints authenticate with the access token
//! rather than the session cookie.

use crate::extract::BearerCaller;
use crate::proxy::segment;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use reqwest::Method;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// Check a file out for editing.
///
/// Needs an access token; without one the caller gets 401 and the backend
/// is never called.
pub async fn checkout_file(
    State(state): State<AppState>,
    caller: BearerCaller,
    Path(file_id): Path<String>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/files/{}/checkout", segment(&file_id)?);
    let request = caller.request("files.checkout", Method::POST, path);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to check out file")
            .await?,
    ))
}

/// Give up a checkout taken with [`checkout_file`].
pub async fn release_checkout(
    State(state): State<AppState>,
    caller: BearerCaller,
    Path(file_id): Path<String>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/files/{}/checkout", segment(&file_id)?);
    let request = caller.request("files.checkin", Method::DELETE, path);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to release file checkout")
            .await?,
    ))
}

/// Current checkout status of a file.
pub async fn file_status(
    State(state): State<AppState>,
    caller: BearerCaller,
    Path(file_id): Path<String>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/files/{}/status", segment(&file_id)?);
    let request = caller.request("files.status", Method::GET, path);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to fetch file status")
            .await?,
    ))
}
