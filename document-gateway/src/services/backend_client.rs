use crate::config::BackendSettings;
use crate::proxy::response::{normalize_envelope, read_json, stream_download, upstream_error};
use crate::proxy::{Credentials, ForwardRequest};
use axum::response::Response;
use metrics::{counter, histogram};
use reqwest::header::{HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Client;
use serde_json::Value;
use service_core::envelope::ProxyEnvelope;
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use std::time::{Duration, Instant};

/// Relays calls to the document backend. One attempt per call, no retries.
pub struct BackendClient {
    client: Client,
    settings: BackendSettings,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Send the request and return the raw backend response, whatever its
    /// status. Only transport failures are errors here.
    pub async fn send(&self, request: &ForwardRequest) -> Result<reqwest::Response, AppError> {
        let url = request.url(&self.settings.base_url);
        let started = Instant::now();

        let mut outbound = self
            .client
            .traced(request.method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .request_id(request.request_id.as_deref());

        outbound = match &request.credentials {
            Credentials::Session(Some(cookie)) => outbound.header(COOKIE, cookie.clone()),
            Credentials::Session(None) => outbound,
            Credentials::Bearer(token) => outbound.bearer_auth(token),
        };

        if let Some(body) = request.outbound_body() {
            outbound = outbound.json(body);
        }

        if let Some(secs) = self.settings.request_timeout_secs {
            outbound = outbound.timeout(Duration::from_secs(secs));
        }

        let result = outbound.send().await;
        let status = match &result {
            Ok(response) => response.status().as_u16().to_string(),
            Err(_) => "error".to_string(),
        };

        let labels = [("operation", request.operation.to_string()), ("status", status)];
        counter!("backend_requests_total", &labels).increment(1);
        histogram!("backend_request_duration_seconds", &labels)
            .record(started.elapsed().as_secs_f64());

        match result {
            Ok(response) => {
                tracing::debug!(
                    operation = request.operation,
                    method = %request.method,
                    url = %url,
                    status = %response.status(),
                    "Backend responded"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::error!(
                    operation = request.operation,
                    method = %request.method,
                    url = %url,
                    error = %e,
                    "Failed to reach backend"
                );
                Err(AppError::Transport(e.to_string()))
            }
        }
    }

    /// Forward and normalize a 2xx answer into the gateway envelope.
    pub async fn envelope(
        &self,
        request: ForwardRequest,
        fallback: &str,
    ) -> Result<ProxyEnvelope, AppError> {
        let response = self.send(&request).await?;
        if !response.status().is_success() {
            return Err(self.reject(&request, response, fallback).await);
        }

        Ok(normalize_envelope(read_json(response).await?))
    }

    /// Forward and hand back the backend's 2xx JSON untouched.
    pub async fn verbatim(
        &self,
        request: ForwardRequest,
        fallback: &str,
    ) -> Result<Value, AppError> {
        let response = self.send(&request).await?;
        if !response.status().is_success() {
            return Err(self.reject(&request, response, fallback).await);
        }

        read_json(response).await
    }

    /// Forward and stream the 2xx body back with its file headers.
    pub async fn download(
        &self,
        request: ForwardRequest,
        fallback: &str,
    ) -> Result<Response, AppError> {
        let response = self.send(&request).await?;
        if !response.status().is_success() {
            return Err(self.reject(&request, response, fallback).await);
        }

        tracing::info!(
            operation = request.operation,
            path = %request.path,
            content_length = ?response.content_length(),
            "Streaming download from backend"
        );

        Ok(stream_download(response))
    }

    async fn reject(
        &self,
        request: &ForwardRequest,
        response: reqwest::Response,
        fallback: &str,
    ) -> AppError {
        let status = response.status();
        tracing::warn!(
            operation = request.operation,
            path = %request.path,
            status = %status,
            "Backend returned an error"
        );
        upstream_error(response, fallback).await
    }
}
