/// Shared request helpers and builders for the HTTP-level tests.
///
/// Biosamples are the root of the object hierarchy: operators and sample
/// types are created implicitly through them, comments hang off them.
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Extract response body as JSON for testing
pub async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        let raw_text = String::from_utf8_lossy(&bytes);
        json!({"error": raw_text})
    });
    (status, body)
}

/// Sends one request through the router, with an optional JSON body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    extract_response_body(response).await
}

/// Create a test biosample with default parameters
pub async fn create_test_biosample(app: &Router) -> (i32, Value) {
    create_test_biosample_with_params(app, "Rome", "Mario", "water").await
}

/// Create a test biosample with customizable vocabulary names
pub async fn create_test_biosample_with_params(
    app: &Router,
    location: &str,
    operator_name: &str,
    sample_type_name: &str,
) -> (i32, Value) {
    let payload = json!({
        "location": location,
        "samplingDate": "2025-05-20",
        "operatorName": operator_name,
        "sampleTypeName": sample_type_name,
    });

    let (status, body) = send(app, "POST", "/biosamples/", Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "Failed to create biosample: {body:?}");

    let id = i32::try_from(body["id"].as_i64().expect("biosample id")).unwrap();
    (id, body)
}

/// Add a comment to a biosample, asserting success
pub async fn create_test_comment(app: &Router, biosample_id: i32, content: &str) -> Value {
    let payload = json!({
        "content": content,
        "author": "Test Author",
    });

    let (status, body) = send(app, "POST", &format!("/comments/{biosample_id}"), Some(payload)).await;
    assert_eq!(status, StatusCode::OK, "Failed to create comment: {body:?}");
    body
}
