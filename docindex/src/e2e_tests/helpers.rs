//! Common helpers for end-to-end tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::{AppState, build_router};
use crate::auth::{IdentityClient, VerificationKey};
use crate::shell::ShellPage;
use crate::testing::{TEST_SECRET, mint_token, test_auth_config, test_claims, test_store};

/// A router over a fresh in-memory store.
pub struct TestServer {
    router: Router,
}

impl TestServer {
    /// A server that does not check ID tokens.
    #[must_use]
    pub fn open() -> Self {
        Self::build(None)
    }

    /// A server that requires HS256 ID tokens signed with `TEST_SECRET`.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_auth() -> Self {
        let key = VerificationKey::new_hs256(TEST_SECRET.to_vec()).expect("valid secret");
        let identity =
            IdentityClient::initialize(test_auth_config(), &key).expect("client initializes");
        Self::build(Some(identity))
    }

    #[allow(clippy::expect_used)]
    fn build(identity: Option<IdentityClient>) -> Self {
        let state = AppState::new(
            test_store(),
            test_auth_config(),
            identity,
            ShellPage::default(),
        )
        .expect("valid state");
        Self {
            router: build_router(state),
        }
    }

    /// Send an `Authorization` header verbatim with a JSON body.
    #[allow(clippy::expect_used)]
    pub async fn send_json_with_authorization(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        authorization: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, authorization)
            .body(Body::from(body.to_string()))
            .expect("valid request");
        let (status, body) = self.send(request).await;
        (status, parse_json(&body))
    }

    /// Send a request and return the status and raw body.
    #[allow(clippy::expect_used)]
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
    }

    #[allow(clippy::expect_used)]
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let (status, body) = self.get_text(path).await;
        (status, parse_json(&body))
    }

    /// Send a JSON body, with a bearer token if given.
    #[allow(clippy::expect_used)]
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("valid request");
        let (status, body) = self.send(request).await;
        (status, parse_json(&body))
    }

    #[allow(clippy::expect_used)]
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::DELETE).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let (status, body) = self
            .send(builder.body(Body::empty()).expect("valid request"))
            .await;
        (status, parse_json(&body))
    }
}

#[allow(clippy::expect_used)]
pub fn parse_json(body: &str) -> Value {
    serde_json::from_str(body).expect("response body is JSON")
}

/// A valid ID token for `uid`.
pub fn token_for(uid: &str) -> String {
    mint_token(&test_claims(uid), TEST_SECRET)
}

/// Request body for a new document.
pub fn document_json(doc_identifier: &str) -> Value {
    serde_json::json!({
        "title": format!("Title of {doc_identifier}"),
        "author": "A. Author",
        "doc_identifier": doc_identifier,
        "doc_code": "DC-1",
        "compiled_url": format!("https://example.com/{doc_identifier}.pdf"),
        "abstract": "An abstract.",
    })
}
