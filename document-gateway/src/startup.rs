use crate::handlers::{
    app::{health_check, metrics, not_found},
    archive::{archive_document, list_archive},
    auth::socket_token,
    document_files::{download_file, list_files},
    documents::{
        bulk_delete, bulk_restore, cancel_document, completed_documents, document_types,
        incoming_documents, owned_documents, receive_document, release_document, share_document,
        share_documents, shared_documents, sign_document,
    },
    files::{checkout_file, file_status, release_checkout},
    notifications::{delete_notification, list_notifications, mark_all_read, update_notification},
    users::list_users,
};
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{delete, get, patch, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use tower_http::trace::TraceLayer;

fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/share", post(share_documents))
        .route("/bulk-delete", delete(bulk_delete))
        .route("/completed", get(completed_documents))
        .route("/owned", get(owned_documents))
        .route("/types", get(document_types))
        .route("/shared", get(shared_documents))
        .route("/in-transit/incoming", get(incoming_documents))
        .route("/recycle-bin/bulk-restore", post(bulk_restore))
        .route("/:id/cancel", post(cancel_document))
        .route("/:id/receive", post(receive_document))
        .route("/:id/release", post(release_document))
        .route("/:id/sign", post(sign_document))
        .route("/:id/share", post(share_document))
        .route("/:id/files", get(list_files))
        .route("/:id/files/:file_id/download", get(download_file))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/read-all", patch(mark_all_read))
        .route(
            "/:id",
            patch(update_notification).delete(delete_notification),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/archive", get(list_archive))
        .route("/api/archive/:id/archive", post(archive_document))
        .route("/api/auth/socket-token", get(socket_token))
        .nest("/api/documents", document_routes())
        .route(
            "/api/files/:file_id/checkout",
            post(checkout_file).delete(release_checkout),
        )
        .route("/api/files/:file_id/status", get(file_status))
        .nest("/api/notifications", notification_routes())
        .route("/api/users", get(list_users))
        .fallback(not_found)
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
