use crate::extract::{JsonBody, SessionCaller, ValidatedJson};
use crate::models::{BulkDocumentIds, ShareDocumentRequest, ShareRequest};
use crate::proxy::segment;
use crate::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use reqwest::Method;
use serde_json::Value;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;

/// POST a lifecycle action on one document and normalize the answer.
async fn document_action(
    state: &AppState,
    caller: &SessionCaller,
    operation: &'static str,
    id: &str,
    action: &str,
    body: Value,
    fallback: &str,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/documents/{}/{}", segment(id)?, action);
    tracing::info!(document_id = %id, action = action, "Document action");

    let request = caller.request(operation, Method::POST, path).json(body);
    Ok(Json(state.backend.envelope(request, fallback).await?))
}

async fn listing(
    state: &AppState,
    caller: &SessionCaller,
    operation: &'static str,
    path: &str,
    query: Option<String>,
    fallback: &str,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let request = caller.request(operation, Method::GET, path).query(query);
    Ok(Json(state.backend.envelope(request, fallback).await?))
}

/// Cancel a document in flight.
pub async fn cancel_document(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<ProxyEnvelope>, AppError> {
    document_action(
        &state,
        &caller,
        "documents.cancel",
        &id,
        "cancel",
        body,
        "Failed to cancel document",
    )
    .await
}

/// Acknowledge receipt of an incoming document.
pub async fn receive_document(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<ProxyEnvelope>, AppError> {
    document_action(
        &state,
        &caller,
        "documents.receive",
        &id,
        "receive",
        body,
        "Failed to receive document",
    )
    .await
}

/// Sign a document. Optional remarks travel in the body.
pub async fn sign_document(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<ProxyEnvelope>, AppError> {
    document_action(
        &state,
        &caller,
        "documents.sign",
        &id,
        "sign",
        body,
        "Failed to sign document",
    )
    .await
}

/// Release hands the backend's answer back untouched.
pub async fn release_document(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, AppError> {
    let path = format!("/api/documents/{}/release", segment(&id)?);
    tracing::info!(document_id = %id, "Releasing document");

    let request = caller
        .request("documents.release", Method::POST, path)
        .json(body);
    Ok(Json(
        state
            .backend
            .verbatim(request, "Failed to release document")
            .await?,
    ))
}

/// Share one document with other users.
///
/// At least one recipient is required; bad bodies never reach the backend.
pub async fn share_document(
    State(state): State<AppState>,
    caller: SessionCaller,
    Path(id): Path<String>,
    payload: ValidatedJson<ShareDocumentRequest>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    let path = format!("/api/documents/{}/share", segment(&id)?);
    tracing::info!(
        document_id = %id,
        recipients = payload.value.user_ids.len(),
        "Sharing document"
    );

    let request = caller
        .request("documents.share", Method::POST, path)
        .json(payload.raw);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to share document")
            .await?,
    ))
}

/// Share through the collection route, naming the document in the body.
pub async fn share_documents(
    State(state): State<AppState>,
    caller: SessionCaller,
    payload: ValidatedJson<ShareRequest>,
) -> Result<Json<ProxyEnvelope>, AppError> {
    tracing::info!(
        document_id = %payload.value.document_id,
        recipients = payload.value.user_ids.len(),
        "Sharing document"
    );

    let request = caller
        .request("documents.share", Method::POST, "/api/documents/share")
        .json(payload.raw);
    Ok(Json(
        state
            .backend
            .envelope(request, "Failed to share document")
            .await?,
    ))
}

/// Move several documents to the recycle bin. The backend answer is
/// relayed as-is.
pub async fn bulk_delete(
    State(state): State<AppState>,
    caller: SessionCaller,
    payload: ValidatedJson<BulkDocumentIds>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(count = payload.value.document_ids.len(), "Bulk deleting documents");

    let request = caller
        .request(
            "documents.bulk_delete",
            Method::DELETE,
            "/api/documents/bulk-delete",
        )
        .json(payload.raw);
    Ok(Json(
        state
            .backend
            .verbatim(request, "Failed to delete documents")
            .await?,
    ))
}

/// Restore documents from the recycle bin.
pub async fn bulk_restore(
    State(state): State<AppState>,
    caller: SessionCaller,
    payload: ValidatedJson<BulkDocumentIds>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(
        count = payload.value.document_ids.len(),
        "Restoring documents from recycle bin"
    );

    let request = caller
        .request(
            "recycle_bin.bulk_restore",
            Method::POST,
            "/api/recycle-bin/bulk-restore",
        )
        .json(payload.raw);
    Ok(Json(
        state
            .backend
            .verbatim(request, "Failed to restore documents")
            .await?,
    ))
}

/// Documents whose workflow has finished.
pub async fn completed_documents(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    listing(
        &state,
        &caller,
        "documents.completed",
        "/api/documents/completed",
        query,
        "Failed to fetch completed documents",
    )
    .await
}

/// Documents created by the caller.
pub async fn owned_documents(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    listing(
        &state,
        &caller,
        "documents.owned",
        "/api/documents/owned",
        query,
        "Failed to fetch owned documents",
    )
    .await
}

/// Document type catalogue.
pub async fn document_types(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    listing(
        &state,
        &caller,
        "documents.types",
        "/api/documents/types",
        query,
        "Failed to fetch document types",
    )
    .await
}

/// Documents other users shared with the caller.
pub async fn shared_documents(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    listing(
        &state,
        &caller,
        "documents.shared",
        "/api/documents/shared",
        query,
        "Failed to fetch shared documents",
    )
    .await
}

/// The backend keeps incoming documents under `/api/intransit`.
pub async fn incoming_documents(
    State(state): State<AppState>,
    caller: SessionCaller,
    RawQuery(query): RawQuery,
) -> Result<Json<ProxyEnvelope>, AppError> {
    listing(
        &state,
        &caller,
        "documents.incoming",
        "/api/intransit/incoming",
        query,
        "Failed to fetch incoming documents",
    )
    .await
}
