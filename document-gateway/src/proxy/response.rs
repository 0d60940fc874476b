use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::{Map, Value};
use service_core::envelope::{PaginationInfo, ProxyEnvelope, PAGING_KEYS};
use service_core::error::AppError;

pub const DOWNLOAD_CACHE_CONTROL: &str = "private, max-age=3600";

/// Headers copied from the backend onto a streamed download.
const PASSTHROUGH_HEADERS: [header::HeaderName; 3] = [
    header::CONTENT_TYPE,
    header::CONTENT_DISPOSITION,
    header::CONTENT_LENGTH,
];

/// Keys an envelope without a `success` flag may carry next to `data`.
const BARE_ENVELOPE_KEYS: &[&str] = &["data", "message", "pagination", "meta"];

/// Unwrap a 2xx backend body into the gateway envelope.
///
/// `{success, data, pagination|meta}` is unwrapped; anything else becomes
/// `data` as-is.
pub fn normalize_envelope(body: Value) -> ProxyEnvelope<Value> {
    match body {
        Value::Object(mut map) if is_envelope(&map) => {
            let pagination = map
                .get("pagination")
                .or_else(|| map.get("meta"))
                .and_then(PaginationInfo::from_backend)
                .or_else(|| PaginationInfo::from_backend(&Value::Object(top_level_paging(&map))));
            let data = map.remove("data").unwrap_or(Value::Null);
            ProxyEnvelope::success(data).with_pagination(pagination)
        }
        other => ProxyEnvelope::success(other),
    }
}

/// `{success: bool, data, ..}` is an envelope whatever else it carries.
/// Without `success`, only `data` plus pagination keys count as one.
fn is_envelope(map: &Map<String, Value>) -> bool {
    if !map.contains_key("data") {
        return false;
    }
    match map.get("success") {
        Some(success) => success.is_boolean(),
        None => map.keys().all(|key| {
            BARE_ENVELOPE_KEYS.contains(&key.as_str()) || PAGING_KEYS.contains(&key.as_str())
        }),
    }
}

fn top_level_paging(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| PAGING_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Best-effort error for a non-2xx backend answer.
///
/// Understands `{error: {message, details}}`, `{error: "..."}` and
/// `{message: "..."}`; anything unparseable gets `fallback`.
pub fn error_from_body(status: StatusCode, body: &[u8], fallback: &str) -> AppError {
    let parsed = serde_json::from_slice::<Value>(body).ok();
    let (message, details) = parsed
        .as_ref()
        .map(extract_error)
        .unwrap_or((None, None));

    AppError::Upstream {
        status,
        message: message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        details,
    }
}

fn extract_error(body: &Value) -> (Option<String>, Option<Value>) {
    let top_details = body.get("details").cloned();
    match body.get("error") {
        Some(Value::Object(error)) => (
            error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            error.get("details").cloned().or(top_details),
        ),
        Some(Value::String(message)) => (Some(message.clone()), top_details),
        _ => (
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            top_details,
        ),
    }
}

/// Drain a non-2xx response into an [`AppError::Upstream`].
pub async fn upstream_error(response: reqwest::Response, fallback: &str) -> AppError {
    let status = response.status();
    match response.bytes().await {
        Ok(bytes) => error_from_body(status, &bytes, fallback),
        Err(e) => {
            tracing::warn!(status = %status, error = %e, "Failed to read backend error body");
            AppError::Upstream {
                status,
                message: fallback.to_string(),
                details: None,
            }
        }
    }
}

/// Read a 2xx body as JSON. An empty body reads as `null`.
pub async fn read_json(response: reqwest::Response) -> Result<Value, AppError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Transport(e.to_string()))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Transport(format!("Invalid JSON from backend: {}", e)))
}

/// Stream a 2xx body through untouched, keeping status and file headers.
pub fn stream_download(response: reqwest::Response) -> Response {
    let status = response.status();

    let mut headers = HeaderMap::new();
    for name in PASSTHROUGH_HEADERS {
        if let Some(value) = response.headers().get(&name) {
            headers.insert(name, value.clone());
        }
    }
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(DOWNLOAD_CACHE_CONTROL),
    );

    let mut proxied = Response::new(Body::from_stream(response.bytes_stream()));
    *proxied.status_mut() = status;
    *proxied.headers_mut() = headers;
    proxied
}
