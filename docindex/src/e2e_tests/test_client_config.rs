//! Test the identity config endpoint used by the browser client.

use axum::http::StatusCode;

use crate::e2e_tests::helpers::*;
use crate::testing::TEST_PROJECT;

#[tokio::test]
async fn test_init_json() {
    let server = TestServer::open();
    let (status, body) = server.get_json("/__/firebase/init.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiKey"], "test-api-key");
    assert_eq!(body["authDomain"], format!("{TEST_PROJECT}.firebaseapp.com"));
    assert_eq!(body["projectId"], TEST_PROJECT);
}
