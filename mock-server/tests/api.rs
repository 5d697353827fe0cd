use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_reports_method_path_and_query() {
    let resp = app()
        .oneshot(request("GET", "/echo?q=rust+http&page=2&page=3", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.path, "/echo");
    assert_eq!(
        echo.query,
        vec![
            ("q".to_string(), "rust http".to_string()),
            ("page".to_string(), "2".to_string()),
            ("page".to_string(), "3".to_string()),
        ]
    );
    assert!(echo.body.is_empty());
}

#[tokio::test]
async fn echo_reports_headers_and_body() {
    let req = Request::builder()
        .method("PATCH")
        .uri("/echo")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("X-Request-Id", "42")
        .body(r#"{"name":"widget"}"#.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.header("content-type"), Some("application/json"));
    assert_eq!(echo.header("x-request-id"), Some("42"));
    assert_eq!(echo.body, r#"{"name":"widget"}"#);
    assert!(echo.query.is_empty());
}

#[tokio::test]
async fn echo_keeps_repeated_headers() {
    let req = Request::builder()
        .method("GET")
        .uri("/echo")
        .header("X-Tag", "first")
        .header("X-Tag", "second")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.header_values("x-tag"), vec!["first", "second"]);
}

#[tokio::test]
async fn echo_accepts_every_verb() {
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let resp = app().oneshot(request(method, "/echo", "")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{method}");
        let echo: Echo = body_json(resp).await;
        assert_eq!(echo.method, method);
    }
}

// --- status ---

#[tokio::test]
async fn status_returns_the_requested_code() {
    let resp = app().oneshot(request("POST", "/status/418", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "status 418");
}

#[tokio::test]
async fn no_content_status_has_no_body() {
    let resp = app().oneshot(request("DELETE", "/status/204", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn status_rejects_non_numeric_codes() {
    let resp = app().oneshot(request("GET", "/status/abc", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_rejects_out_of_range_codes() {
    let resp = app().oneshot(request("GET", "/status/42", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(resp).await, "invalid status 42");
}

// --- delay ---

#[tokio::test]
async fn delay_responds_after_sleeping() {
    let started = std::time::Instant::now();
    let resp = app().oneshot(request("GET", "/delay/50", "")).await.unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "slept 50ms");
}

// --- bytes ---

#[tokio::test]
async fn bytes_returns_the_requested_length() {
    let resp = app().oneshot(request("GET", "/bytes/1024", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), 1024);
    assert!(body.iter().all(|b| *b == b'x'));
}

#[tokio::test]
async fn bytes_rejects_non_numeric_lengths() {
    let resp = app().oneshot(request("GET", "/bytes/lots", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- json ---

#[tokio::test]
async fn json_document_lists_verbs() {
    let resp = app().oneshot(request("GET", "/json", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    let doc: serde_json::Value = body_json(resp).await;
    assert_eq!(doc["name"], "resty");
    assert_eq!(doc["verbs"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(request("GET", "/nope", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
