use crate::extract::SessionCaller;
use crate::models::document::{file_list, DocumentFileMetadata};
use crate::proxy::segment;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use reqwest::Method;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// List a document's files, reshaped into the browser's file metadata.
pub async fn list_files(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
) -> Result<Json<ProxyEnvelope<Vec<DocumentFileMetadata>>>, AppError> {
    let path = format!("/api/documents/{}/files", segment(&id)?);
    let envelope = state
        .backend
        .envelope(
            caller.request("documents.files", Method::GET, path),
            "Failed to fetch document files",
        )
        .await?;

    let pagination = envelope.pagination;
    let files = file_list(envelope.data.unwrap_or_default())
        .map_err(|e| AppError::Transport(format!("Unexpected file listing from backend: {}", e)))?
        .into_iter()
        .map(|file| file.with_download_url(&id))
        .collect::<Vec<_>>();

    Ok(Json(ProxyEnvelope::success(files).with_pagination(pagination)))
}

/// Stream one file through. Bytes are never buffered in the gateway.
pub async fn download_file(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path((id, file_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let path = format!(
        "/api/documents/{}/files/{}/download",
        segment(&id)?,
        segment(&file_id)?
    );
    tracing::info!(document_id = %id, file_id = %file_id, "Document file download request");

    state
        .backend
        .download(
            caller.request("documents.file_download", Method::GET, path),
            "Failed to download file",
        )
        .await
}
