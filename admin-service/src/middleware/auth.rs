use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use service_core::auth::{ClaimCapabilities, RequestCapabilities};
use service_core::error::AppError;
use std::sync::Arc;

fn access_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    from_header.or_else(|| {
        CookieJar::from_headers(headers)
            .get(cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Require a valid access token and expose the caller's capabilities to
/// handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = access_token(req.headers(), &state.config.auth.token_cookie).ok_or_else(|| {
        AppError::Unauthorized(anyhow::anyhow!("Missing or invalid Authorization header"))
    })?;

    let claims = state.verifier.verify(&token)?;
    tracing::debug!(user_id = %claims.sub, "Authenticated admin request");

    req.extensions_mut()
        .insert(RequestCapabilities(Arc::new(ClaimCapabilities::from_claims(&claims))));

    Ok(next.run(req).await)
}
