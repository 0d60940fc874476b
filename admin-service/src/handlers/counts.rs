use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use service_core::auth::RequestCapabilities;
use service_core::error::AppError;

pub const COUNTS_READ: &str = "admin:counts:read";

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

pub async fn department_count(
    State(state): State<AppState>,
    capabilities: RequestCapabilities,
) -> Result<Json<CountResponse>, AppError> {
    capabilities.require(COUNTS_READ)?;
    let count = state.counts.department_count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn document_type_count(
    State(state): State<AppState>,
    capabilities: RequestCapabilities,
) -> Result<Json<CountResponse>, AppError> {
    capabilities.require(COUNTS_READ)?;
    let count = state.counts.document_type_count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn document_action_count(
    State(state): State<AppState>,
    capabilities: RequestCapabilities,
) -> Result<Json<CountResponse>, AppError> {
    capabilities.require(COUNTS_READ)?;
    let count = state.counts.document_action_count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn user_count(
    State(state): State<AppState>,
    capabilities: RequestCapabilities,
) -> Result<Json<CountResponse>, AppError> {
    capabilities.require(COUNTS_READ)?;
    let count = state.counts.user_count().await?;
    Ok(Json(CountResponse { count }))
}
