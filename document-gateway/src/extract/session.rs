use crate::proxy::{Credentials, ForwardRequest};
use crate::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use reqwest::Method;
use service_core::error::AppError;
use service_core::middleware::tracing::RequestId;

fn request_id(parts: &Parts) -> Option<String> {
    parts.extensions.get::<RequestId>().map(|id| id.0.clone())
}

/// Caller authenticated by the session cookie. The cookie is relayed to the
/// backend as-is; the gateway never inspects it.
#[derive(Debug, Clone)]
pub struct SessionCaller {
    pub cookie: Option<header::HeaderValue>,
    pub request_id: Option<String>,
}

impl SessionCaller {
    pub fn request(
        &self,
        operation: &'static str,
        method: Method,
        path: impl Into<String>,
    ) -> ForwardRequest {
        ForwardRequest::new(operation, method, path)
            .credentials(Credentials::Session(self.cookie.clone()))
            .request_id(self.request_id.clone())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionCaller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            cookie: parts.headers.get(header::COOKIE).cloned(),
            request_id: request_id(parts),
        })
    }
}

/// Caller holding an access token, taken from the token cookie or an
/// inbound `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct BearerCaller {
    pub token: String,
    pub request_id: Option<String>,
}

impl BearerCaller {
    pub fn request(
        &self,
        operation: &'static str,
        method: Method,
        path: impl Into<String>,
    ) -> ForwardRequest {
        ForwardRequest::new(operation, method, path)
            .credentials(Credentials::Bearer(self.token.clone()))
            .request_id(self.request_id.clone())
    }
}

/// Token lookup order: the named cookie, then the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl FromRequestParts<AppState> for BearerCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers, &state.settings.session.token_cookie)
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Authentication required")))?;

        Ok(Self {
            token,
            request_id: request_id(parts),
        })
    }
}
