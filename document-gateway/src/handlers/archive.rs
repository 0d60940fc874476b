use crate::extract::SessionCaller;
use crate::proxy::segment;
use crate::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use reqwest::Method;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// List archived documents. The query string is forwarded untouched.
pub async fn list_archive(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let request = caller
        .request("archive.list", Method::GET, "/api/archive")
        .query(query);

    let envelope = state
        .backend
        .envelope(request, "Failed to fetch archived documents")
        .await?;
    Ok(Json(envelope))
}

/// Move a document into the archive.
pub async fn archive_document(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/archive/{}/archive", segment(&id)?);
    tracing::info!(document_id = %id, "Archiving document");

    let envelope = state
        .backend
        .envelope(
            caller.request("archive.archive", Method::POST, path),
            "Failed to archive document",
        )
        .await?;
    Ok(Json(envelope))
}
