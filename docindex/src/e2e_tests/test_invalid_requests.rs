//! Test how the API answers unusable request bodies.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_missing_required_field() {
    let server = TestServer::open();
    let (status, body) = server
        .send_json(
            Method::POST,
            "/api/documents",
            &serde_json::json!({"title": "T", "author": "A"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_field_too_long() {
    let server = TestServer::open();
    let mut document = document_json("D-1");
    document["title"] = serde_json::json!("t".repeat(101));
    let (status, body) = server
        .send_json(Method::POST, "/api/documents", &document, None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "title must be at most 100 characters");
}

#[tokio::test]
#[allow(clippy::expect_used)]
async fn test_malformed_json() {
    let server = TestServer::open();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/documents")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("valid request");
    let (status, body) = server.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse_json(&body)["status"], "fail");
}

#[tokio::test]
#[allow(clippy::expect_used)]
async fn test_missing_content_type() {
    let server = TestServer::open();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/documents")
        .body(Body::from(document_json("D-1").to_string()))
        .expect("valid request");
    let (status, body) = server.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(parse_json(&body)["status"], "fail");
}
