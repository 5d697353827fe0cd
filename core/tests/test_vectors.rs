//! Verify request building against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names a verb, an endpoint, entities and an optional body, and
//! describes the request that must come out. JSON bodies are compared as
//! parsed values so key order cannot cause false negatives.

use resty_core::{HttpMethod, HttpRequest, RestEntity, Timeouts};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn build(case: &serde_json::Value) -> HttpRequest {
    let method = parse_method(case["method"].as_str().unwrap());
    let endpoint = case["endpoint"].as_str().unwrap();
    let entities: Vec<RestEntity> = serde_json::from_value(case["entities"].clone()).unwrap();

    let request = HttpRequest::new(method, endpoint, Timeouts::default(), &entities).unwrap();
    match case.get("body") {
        Some(body) => request
            .with_body(body, case["media_type"].as_str().unwrap())
            .unwrap(),
        None => request,
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];
        let req = build(case);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected["body"].as_str() {
            None => assert!(req.body.is_none(), "{name}: body should be None"),
            Some(body) if req.media_type.as_deref() == Some("application/json") => {
                let sent: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
                let want: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(sent, want, "{name}: body");
            }
            Some(body) => {
                assert_eq!(req.body.as_deref(), Some(body.as_bytes()), "{name}: body");
            }
        }

        assert_eq!(req.timeouts, Timeouts::from_millis(5000, 5000), "{name}: timeouts");
    }
}
