use reqwest::header::HeaderValue;
use reqwest::Method;
use serde_json::Value;
use service_core::error::AppError;
use std::borrow::Cow;

/// How the caller's session travels to the backend.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Relay the inbound `cookie` header, when there was one.
    Session(Option<HeaderValue>),
    /// Send `Authorization: Bearer <token>`.
    Bearer(String),
}

/// One outbound call to the document backend.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    /// Stable name used for logs and metric labels, e.g. `documents.sign`.
    pub operation: &'static str,
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub credentials: Credentials,
    pub request_id: Option<String>,
}

impl ForwardRequest {
    pub fn new(operation: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            query: None,
            body: None,
            credentials: Credentials::Session(None),
            request_id: None,
        }
    }

    /// Raw query string, forwarded unchanged. Empty strings are dropped.
    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    /// JSON body. Ignored for methods that do not carry one.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn carries_body(&self) -> bool {
        !matches!(self.method, Method::GET | Method::HEAD)
    }

    /// The body that will actually be sent.
    pub fn outbound_body(&self) -> Option<&Value> {
        if self.carries_body() {
            self.body.as_ref()
        } else {
            None
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match &self.query {
            Some(query) => format!("{}{}?{}", base, self.path, query),
            None => format!("{}{}", base, self.path),
        }
    }
}

/// Percent-encode a caller-supplied id before splicing it into a backend
/// path, so `/` or `?` in an id cannot reach another backend route. Dot
/// segments are rejected outright since URL parsing would collapse them.
pub fn segment(id: &str) -> Result<Cow<'_, str>, AppError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(AppError::BadRequest(anyhow::anyhow!("Invalid identifier")));
    }
    Ok(urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_base_path_and_query() {
        let request = ForwardRequest::new("documents.owned", Method::GET, "/api/documents/owned")
            .query(Some("page=2&limit=10".to_string()));

        assert_eq!(
            request.url("http://backend:3001/"),
            "http://backend:3001/api/documents/owned?page=2&limit=10"
        );
    }

    #[test]
    fn empty_query_is_not_appended() {
        let request = ForwardRequest::new("archive.list", Method::GET, "/api/archive")
            .query(Some(String::new()));
        assert_eq!(request.url("http://b"), "http://b/api/archive");
    }

    #[test]
    fn read_methods_never_send_a_body() {
        let get = ForwardRequest::new("x", Method::GET, "/x").json(json!({ "a": 1 }));
        assert!(get.outbound_body().is_none());

        let delete = ForwardRequest::new("x", Method::DELETE, "/x").json(json!({ "a": 1 }));
        assert_eq!(delete.outbound_body(), Some(&json!({ "a": 1 })));
    }

    #[test]
    fn ids_are_encoded_as_single_segments() {
        assert_eq!(segment("doc-1").unwrap(), "doc-1");
        assert_eq!(segment("../admin").unwrap(), "..%2Fadmin");
        assert_eq!(segment("a?b").unwrap(), "a%3Fb");
    }

    #[test]
    fn dot_and_blank_ids_are_rejected() {
        assert!(matches!(segment(".."), Err(AppError::BadRequest(_))));
        assert!(matches!(segment("."), Err(AppError::BadRequest(_))));
        assert!(matches!(segment(" "), Err(AppError::BadRequest(_))));
    }
}
