use super::claims::AccessClaims;
use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

/// Answers "may the current caller do `permission`?".
pub trait Capabilities: Send + Sync {
    fn has(&self, permission: &str) -> bool;
}

impl<F> Capabilities for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn has(&self, permission: &str) -> bool {
        self(permission)
    }
}

/// Capabilities derived from token claims: explicit permissions plus
/// whatever the caller's role grants.
#[derive(Debug, Clone)]
pub struct ClaimCapabilities {
    grants: Vec<String>,
}

impl ClaimCapabilities {
    pub fn from_claims(claims: &AccessClaims) -> Self {
        let mut grants = claims.permissions.clone();
        if let Some(role) = &claims.role {
            grants.extend(role_grants(role).iter().map(|g| g.to_string()));
        }
        Self { grants }
    }
}

impl Capabilities for ClaimCapabilities {
    fn has(&self, permission: &str) -> bool {
        self.grants
            .iter()
            .any(|granted| grant_matches(granted, permission))
    }
}

fn role_grants(role: &str) -> &'static [&'static str] {
    match role.to_ascii_uppercase().as_str() {
        "ADMIN" | "SUPERADMIN" | "SUPER_ADMIN" => &["*"],
        _ => &[],
    }
}

/// `*` grants everything, `admin:*` grants anything under `admin:`.
fn grant_matches(granted: &str, required: &str) -> bool {
    if granted == "*" || granted == required {
        return true;
    }
    match granted.strip_suffix('*') {
        Some(prefix) => required.starts_with(prefix),
        None => false,
    }
}

/// The caller's capabilities, placed in request extensions by an auth
/// middleware.
#[derive(Clone)]
pub struct RequestCapabilities(pub Arc<dyn Capabilities>);

impl RequestCapabilities {
    pub fn require(&self, permission: &str) -> Result<(), AppError> {
        if self.0.has(permission) {
            Ok(())
        } else {
            tracing::warn!(required = %permission, "Missing capability");
            Err(AppError::Forbidden(anyhow::anyhow!(
                "Missing permission: {}",
                permission
            )))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestCapabilities
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestCapabilities>()
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Capabilities missing from request extensions"
                ))
            })
    }
}
