mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{TestApp, ACCESS_TOKEN, SESSION_COOKIE};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[derive(Clone, Copy)]
enum Auth {
    Session,
    Bearer,
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Envelope,
    Verbatim,
    Download,
}

struct Route {
    method: &'static str,
    uri: &'static str,
    backend: &'static str,
    auth: Auth,
    body: Option<Value>,
    mode: Mode,
    fallback: &'static str,
}

fn route(
    method: &'static str,
    uri: &'static str,
    auth: Auth,
    mode: Mode,
    fallback: &'static str,
) -> Route {
    Route {
        method,
        uri,
        backend: uri,
        auth,
        body: None,
        mode,
        fallback,
    }
}

impl Route {
    fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn forwarded_to(mut self, backend: &'static str) -> Self {
        self.backend = backend;
        self
    }

    fn request(&self) -> Request<Body> {
        let builder = Request::builder().method(self.method).uri(self.uri);
        let builder = match self.auth {
            Auth::Session => builder.header("cookie", SESSION_COOKIE),
            Auth::Bearer => builder.header("cookie", format!("token={}", ACCESS_TOKEN)),
        };
        let request = match &self.body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };
        request.unwrap()
    }

    fn mock(&self, response: ResponseTemplate) -> Mock {
        let mock = Mock::given(method(self.method)).and(path(self.backend));
        let bearer = format!("Bearer {}", ACCESS_TOKEN);
        let mock = match self.auth {
            Auth::Session => mock.and(header("cookie", SESSION_COOKIE)),
            Auth::Bearer => mock.and(header("authorization", bearer.as_str())),
        };
        mock.respond_with(response).expect(1)
    }

    fn name(&self) -> String {
        format!("{} {}", self.method, self.uri)
    }
}

fn public_routes() -> Vec<Route> {
    use Auth::{Bearer, Session};
    use Mode::{Download, Envelope, Verbatim};

    vec![
        route("GET", "/api/archive", Session, Envelope, "Failed to fetch archived documents"),
        route("POST", "/api/archive/d1/archive", Session, Envelope, "Failed to archive document"),
        route("GET", "/api/auth/socket-token", Session, Envelope, "Failed to get socket token"),
        route("POST", "/api/documents/d1/cancel", Session, Envelope, "Failed to cancel document"),
        route(
            "GET",
            "/api/documents/d1/files",
            Session,
            Envelope,
            "Failed to fetch document files",
        ),
        route(
            "GET",
            "/api/documents/d1/files/f1/download",
            Session,
            Download,
            "Failed to download file",
        ),
        route("POST", "/api/documents/d1/receive", Session, Envelope, "Failed to receive document"),
        route("POST", "/api/documents/d1/release", Session, Verbatim, "Failed to release document"),
        route("POST", "/api/documents/d1/sign", Session, Envelope, "Failed to sign document"),
        route("POST", "/api/documents/d1/share", Session, Envelope, "Failed to share document")
            .with_body(json!({ "userIds": ["u1"] })),
        route("POST", "/api/documents/share", Session, Envelope, "Failed to share document")
            .with_body(json!({ "documentId": "d1", "userIds": ["u1"] })),
        route(
            "DELETE",
            "/api/documents/bulk-delete",
            Session,
            Verbatim,
            "Failed to delete documents",
        )
        .with_body(json!({ "documentIds": ["d1"] })),
        route(
            "GET",
            "/api/documents/completed",
            Session,
            Envelope,
            "Failed to fetch completed documents",
        ),
        route(
            "GET",
            "/api/documents/owned",
            Session,
            Envelope,
            "Failed to fetch owned documents",
        ),
        route("GET", "/api/documents/types", Session, Envelope, "Failed to fetch document types"),
        route(
            "GET",
            "/api/documents/in-transit/incoming",
            Session,
            Envelope,
            "Failed to fetch incoming documents",
        )
        .forwarded_to("/api/intransit/incoming"),
        route(
            "POST",
            "/api/documents/recycle-bin/bulk-restore",
            Session,
            Verbatim,
            "Failed to restore documents",
        )
        .forwarded_to("/api/recycle-bin/bulk-restore")
        .with_body(json!({ "documentIds": ["d1"] })),
        route(
            "GET",
            "/api/documents/shared",
            Session,
            Envelope,
            "Failed to fetch shared documents",
        ),
        route("POST", "/api/files/f1/checkout", Bearer, Envelope, "Failed to check out file"),
        route(
            "DELETE",
            "/api/files/f1/checkout",
            Bearer,
            Envelope,
            "Failed to release file checkout",
        ),
        route("GET", "/api/files/f1/status", Bearer, Envelope, "Failed to fetch file status"),
        route("GET", "/api/notifications", Bearer, Envelope, "Failed to fetch notifications"),
        route(
            "PATCH",
            "/api/notifications/n1",
            Bearer,
            Envelope,
            "Failed to update notification",
        ),
        route(
            "DELETE",
            "/api/notifications/n1",
            Bearer,
            Envelope,
            "Failed to delete notification",
        ),
        route(
            "PATCH",
            "/api/notifications/read-all",
            Bearer,
            Envelope,
            "Failed to mark notifications as read",
        ),
        route("GET", "/api/users", Session, Envelope, "Failed to fetch users"),
    ]
}

/// Listings that reshape their items only round-trip an empty list.
fn payload_for(route: &Route) -> Value {
    match route.uri {
        "/api/users" | "/api/documents/d1/files" => json!([]),
        _ => json!({ "id": "x1", "items": [1, 2, 3] }),
    }
}

#[tokio::test]
async fn every_route_relays_backend_data() {
    for route in public_routes() {
        let app = TestApp::spawn().await;
        let payload = payload_for(&route);

        let response = match route.mode {
            Mode::Download => ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
            Mode::Envelope | Mode::Verbatim => ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": payload.clone()
            })),
        };
        route.mock(response).mount(&app.backend).await;

        let response = app.call(route.request()).await;
        assert_eq!(response.status, StatusCode::OK, "{}", route.name());

        if route.mode == Mode::Download {
            assert_eq!(&response.body[..], b"%PDF-1.4", "{}", route.name());
            continue;
        }
        let body = response.json();
        assert_eq!(body["success"], true, "{}", route.name());
        assert_eq!(body["data"], payload, "{}", route.name());
    }
}

#[tokio::test]
async fn every_route_falls_back_on_unparseable_not_found() {
    for route in public_routes() {
        let app = TestApp::spawn().await;
        route
            .mock(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
            .mount(&app.backend)
            .await;

        let response = app.call(route.request()).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", route.name());

        let body = response.json();
        assert_eq!(body["success"], false, "{}", route.name());
        assert_eq!(body["error"]["message"], route.fallback, "{}", route.name());
        assert!(body.get("data").is_none(), "{}", route.name());
    }
}
