//! Test the sanity-check endpoint.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_pong() {
    let server = TestServer::open();
    let (status, body) = server.get_json("/api/pong").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!("pong!"));
}

#[tokio::test]
async fn test_pong_needs_no_token() {
    let server = TestServer::with_auth();
    let (status, _) = server.get_json("/api/pong").await;
    assert_eq!(status, StatusCode::OK);
}
