mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use common::{with_token, TestApp, ACCESS_TOKEN};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn bearer() -> String {
    format!("Bearer {}", ACCESS_TOKEN)
}

#[tokio::test]
async fn missing_token_is_rejected_without_calling_backend() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    for (verb, uri) in [
        ("POST", "/api/files/f1/checkout"),
        ("GET", "/api/files/f1/status"),
        ("GET", "/api/notifications"),
        ("PATCH", "/api/notifications/read-all"),
    ] {
        let request = Request::builder()
            .method(verb)
            .uri(uri)
            .header("cookie", "connect.sid=abc")
            .body(Body::empty())
            .unwrap();
        let response = app.call(request).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{} {}", verb, uri);
        assert_eq!(response.json()["success"], false);
    }
}

#[tokio::test]
async fn checkout_forwards_bearer_token() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path("/api/files/f1/checkout"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "fileId": "f1", "checkedOutBy": "u1" }
        })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app.call(with_token("POST", "/api/files/f1/checkout")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["checkedOutBy"], "u1");
}

#[tokio::test]
async fn checkin_and_status_use_their_routes() {
    let app = TestApp::spawn().await;
    Mock::given(method("DELETE"))
        .and(path("/api/files/f1/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "released": true } })))
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/files/f1/status"))
        .respond_with(ResponseTemplate::new(423).set_body_json(json!({ "error": "File is locked" })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let released = app.call(with_token("DELETE", "/api/files/f1/checkout")).await;
    assert_eq!(released.json()["data"]["released"], true);

    let status = app.call(with_token("GET", "/api/files/f1/status")).await;
    assert_eq!(status.status, StatusCode::LOCKED);
    assert_eq!(status.json()["error"]["message"], "File is locked");
}

#[tokio::test]
async fn authorization_header_is_accepted_as_token_source() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .and(header("authorization", "Bearer header-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": { "page": 1, "limit": 20, "total": 0 }
        })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let request = Request::builder()
        .uri("/api/notifications")
        .header("authorization", "Bearer header-token")
        .body(Body::empty())
        .unwrap();
    let response = app.call(request).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn notification_updates_forward_body() {
    let app = TestApp::spawn().await;
    Mock::given(method("PATCH"))
        .and(path("/api/notifications/n1"))
        .and(header("authorization", bearer().as_str()))
        .and(body_json(json!({ "read": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "n1", "read": true } })))
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/notifications/n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })))
        .expect(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/notifications/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "updated": 3 } })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/notifications/n1")
        .header("cookie", format!("token={}", ACCESS_TOKEN))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "read": true }).to_string()))
        .unwrap();
    let updated = app.call(request).await;
    assert_eq!(updated.json()["data"]["read"], true);

    let deleted = app.call(with_token("DELETE", "/api/notifications/n1")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["success"], true);

    let all = app.call(with_token("PATCH", "/api/notifications/read-all")).await;
    assert_eq!(all.json()["data"]["updated"], 3);
}
