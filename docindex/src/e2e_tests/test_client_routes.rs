//! Test that client routes are served the shell page in history mode.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_known_client_routes_serve_shell() {
    let server = TestServer::open();
    for path in ["/", "/documents/42", "/collaborators", "/ping", "/documents/7?tab=abstract"] {
        let (status, body) = server.get_text(path).await;
        assert_eq!(status, StatusCode::OK, "path {path}");
        assert!(body.contains(r#"<div id="app"></div>"#), "path {path}");
    }
}

#[tokio::test]
async fn test_unknown_client_route_is_404_with_shell() {
    let server = TestServer::open();
    let (status, body) = server.get_text("/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(r#"<div id="app"></div>"#));
}

#[tokio::test]
async fn test_superseded_docs_path_is_not_routed() {
    let server = TestServer::open();
    let (status, _) = server.get_text("/docs/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let server = TestServer::open();
    let (status, body) = server.get_json("/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
#[allow(clippy::expect_used)]
async fn test_post_to_client_route_not_allowed() {
    let server = TestServer::open();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/collaborators")
        .body(Body::empty())
        .expect("valid request");
    let (status, _) = server.send(request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
