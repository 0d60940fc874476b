use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use service_core::error::AppError;
use validator::Validate;

/// Any JSON body. An empty body reads as `{}`.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read request body: {}", e))
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid JSON body: {}", e)))
    }
}

/// A typed, validated body that also keeps the JSON it was read from, so the
/// exact payload can be forwarded.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T> {
    pub value: T,
    pub raw: Value,
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(raw) = JsonBody::from_request(req, state).await?;
        let value: T = serde_json::from_value(raw.clone())
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e)))?;
        value.validate()?;

        Ok(Self { value, raw })
    }
}
