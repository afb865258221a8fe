//! Integration tests for pipeboard-http-client using mockito

use pipeboard_http_client::{HttpClient, HttpError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestPayload {
    name: String,
    value: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestResponse {
    success: bool,
    data: String,
}

// === HttpClient::fetch tests ===

#[tokio::test]
async fn test_fetch_success() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/data")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "hello"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/data", server.url());
    let result: Result<TestResponse, _> = client.fetch(&url).await;

    assert!(result.is_ok());
    let response = result.expect("Fetch should succeed");
    assert!(response.success);
    assert_eq!(response.data, "hello");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/error")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/error", server.url());
    let result: Result<TestResponse, _> = client.fetch(&url).await;

    assert!(result.is_err());
    if let Err(HttpError::Status { status, message }) = result {
        assert_eq!(status, 404);
        assert_eq!(message, "Not Found");
    } else {
        panic!("Expected HttpError::Status");
    }

    mock.assert_async().await;
}

// === RequestBuilder tests ===

#[tokio::test]
async fn test_post_json() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/submit")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "name": "test",
            "value": 42
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "received"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/submit", server.url());
    let payload = TestPayload {
        name: "test".to_string(),
        value: 42,
    };
    let result: Result<TestResponse, _> = client.post(&url).json(&payload).send_json().await;

    assert!(result.is_ok());
    let response = result.expect("POST JSON should succeed");
    assert!(response.success);
    assert_eq!(response.data, "received");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_put_json() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("PUT", "/api/resource")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "updated"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/resource", server.url());
    let payload = TestPayload {
        name: "update".to_string(),
        value: 99,
    };
    let result: TestResponse = client
        .put(&url)
        .json(&payload)
        .send_json()
        .await
        .expect("PUT should succeed");

    assert!(result.success);
    assert_eq!(result.data, "updated");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/api/resource/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "deleted"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/resource/1", server.url());
    let result: TestResponse = client
        .delete(&url)
        .send_json()
        .await
        .expect("DELETE should succeed");

    assert!(result.success);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_builder_with_headers() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/headers")
        .match_header("X-Custom-Header", "custom-value")
        .match_header("Authorization", "Bearer token123")
        .with_status(200)
        .with_body("headers received")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/headers", server.url());
    let response = client
        .get(&url)
        .header("X-Custom-Header", "custom-value")
        .header("Authorization", "Bearer token123")
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_header_override_replaces_default() {
    let mut server = mockito::Server::new_async().await;

    // json() sets application/json; the later header call must win
    let mock = server
        .mock("POST", "/api/override")
        .match_header("content-type", "application/vnd.custom+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "ok"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/override", server.url());
    let result: TestResponse = client
        .post(&url)
        .json(&serde_json::json!({"k": "v"}))
        .header("Content-Type", "application/vnd.custom+json")
        .send_json()
        .await
        .expect("Request should succeed");

    assert!(result.success);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_pairs_preserve_order() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/x?a=1&b=2")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/x", server.url());
    let response = client
        .get(&url)
        .query_pairs([("a", "1"), ("b", "2")])
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_query_appends_nothing() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/x")
        .match_query(mockito::Matcher::Missing)
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/x", server.url());
    let response = client
        .get(&url)
        .send()
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);

    mock.assert_async().await;
}

// === RawResponse tests ===

#[tokio::test]
async fn test_raw_response_status_classes() {
    let mut server = mockito::Server::new_async().await;

    for (status, success, client_err, server_err) in [
        (200u16, true, false, false),
        (299, true, false, false),
        (301, false, false, false),
        (404, false, true, false),
        (500, false, false, true),
    ] {
        let mock = server
            .mock("GET", "/")
            .with_status(usize::from(status))
            .create_async()
            .await;

        let client = HttpClient::builder()
            .follow_redirects(false)
            .build()
            .expect("Client should build");
        let response = client
            .get_raw(&server.url())
            .await
            .expect("Request should succeed");

        assert_eq!(response.status(), status);
        assert_eq!(response.is_success(), success);
        assert_eq!(response.is_client_error(), client_err);
        assert_eq!(response.is_server_error(), server_err);

        mock.assert_async().await;
        mock.remove_async().await;
    }
}

#[tokio::test]
async fn test_raw_response_content_type() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body("{}")
        .create_async()
        .await;

    let client = HttpClient::new();
    let response = client
        .get_raw(&server.url())
        .await
        .expect("Request should succeed");

    assert!(response.is_json());
    assert_eq!(
        response.content_type(),
        Some("application/json; charset=utf-8")
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_raw_response_not_json() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html></html>")
        .create_async()
        .await;

    let client = HttpClient::new();
    let response = client
        .get_raw(&server.url())
        .await
        .expect("Request should succeed");

    assert!(!response.is_json());
    let text = response.text().await.expect("Text should be readable");
    assert_eq!(text, "<html></html>");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_raw_response_bytes() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(vec![0x01, 0x02, 0x03, 0x04])
        .create_async()
        .await;

    let client = HttpClient::new();
    let response = client
        .get_raw(&server.url())
        .await
        .expect("Request should succeed");
    let bytes = response
        .bytes()
        .await
        .expect("Bytes extraction should succeed");

    assert_eq!(bytes, vec![0x01, 0x02, 0x03, 0x04]);

    mock.assert_async().await;
}

// === Error handling tests ===

#[tokio::test]
async fn test_json_deserialization_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/invalid-json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not valid json")
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!("{}/api/invalid-json", server.url());
    let result: Result<TestResponse, _> = client.fetch(&url).await;

    assert!(matches!(result, Err(HttpError::Parse(_))));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_network_error() {
    // Nothing is listening on this port
    let client = HttpClient::new();
    let result: Result<TestResponse, _> = client.fetch("http://127.0.0.1:1/api").await;

    assert!(matches!(result, Err(HttpError::Network(_))));
}

// === Convenience function test ===

#[tokio::test]
async fn test_fetch_convenience_function() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/convenience")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": "convenience"}"#)
        .create_async()
        .await;

    let url = format!("{}/api/convenience", server.url());
    let result: Result<TestResponse, _> = pipeboard_http_client::fetch(&url).await;

    assert!(result.is_ok());
    let response = result.expect("Fetch should succeed");
    assert!(response.success);
    assert_eq!(response.data, "convenience");

    mock.assert_async().await;
}
