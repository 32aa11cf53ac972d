//! Test the document lifecycle through the API.

use axum::http::{Method, StatusCode};

use crate::e2e_tests::helpers::*;

#[tokio::test]
async fn test_list_empty() {
    let server = TestServer::open();
    let (status, body) = server.get_json("/api/documents").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "success", "documents": []}));
}

#[tokio::test]
async fn test_create_then_fetch() {
    let server = TestServer::open();

    let (status, body) = server
        .send_json(Method::POST, "/api/documents", &document_json("D-1"), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Document added!");
    assert_eq!(body["document"]["doc_identifier"], "D-1");

    let (status, body) = server.get_json("/api/documents/D-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document"]["title"], "Title of D-1");
    assert_eq!(body["document"]["abstract"], "An abstract.");
    assert!(body["document"]["source_url"].is_null());

    let (_, body) = server.get_json("/api/documents").await;
    assert_eq!(body["documents"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_fetch_missing_document() {
    let server = TestServer::open();
    let (status, body) = server.get_json("/api/documents/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "No document found.");
}

#[tokio::test]
async fn test_update_document() {
    let server = TestServer::open();
    server
        .send_json(Method::POST, "/api/documents", &document_json("D-1"), None)
        .await;

    let (status, body) = server
        .send_json(
            Method::PUT,
            "/api/documents/D-1",
            &serde_json::json!({"title": "Retitled", "source_url": "https://git.example.com/d1"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Document updated!");
    assert_eq!(body["document"]["title"], "Retitled");
    assert_eq!(body["document"]["author"], "A. Author");

    let (_, body) = server.get_json("/api/documents/D-1").await;
    assert_eq!(body["document"]["source_url"], "https://git.example.com/d1");
}

#[tokio::test]
async fn test_update_missing_document() {
    let server = TestServer::open();
    let (status, body) = server
        .send_json(
            Method::PUT,
            "/api/documents/ghost",
            &serde_json::json!({"title": "x"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Document not found");
}

#[tokio::test]
async fn test_delete_document() {
    let server = TestServer::open();
    server
        .send_json(Method::POST, "/api/documents", &document_json("D-1"), None)
        .await;

    let (status, body) = server.delete("/api/documents/D-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Document removed!");

    let (status, _) = server.get_json("/api/documents/D-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = server.delete("/api/documents/D-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_duplicate_identifier_conflicts() {
    let server = TestServer::open();
    server
        .send_json(Method::POST, "/api/documents", &document_json("D-1"), None)
        .await;
    let (status, body) = server
        .send_json(Method::POST, "/api/documents", &document_json("D-1"), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "fail");

    let (_, body) = server.get_json("/api/documents").await;
    assert_eq!(body["documents"].as_array().map(Vec::len), Some(1));
}
