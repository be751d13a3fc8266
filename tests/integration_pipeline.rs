mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use common::*;
use jobboard::router::with_pipeline;
use jobboard_core::errors::INTERNAL_ERROR;
use serde_json::json;

#[tokio::test]
async fn test_landing_page_carries_pipeline_headers() {
    let app = setup_app();

    let response = send(&app, empty_request("GET", "/", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("<h1>Jobs Api</h1>"));
    assert!(response.text.contains("/api-docs"));

    let headers = &response.headers;
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert!(headers.contains_key("strict-transport-security"));
    assert_eq!(headers["x-ratelimit-limit"], "100");
    assert_eq!(headers["x-ratelimit-remaining"], "99");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_is_normalized_404() {
    let app = setup_app();

    let response = send(&app, empty_request("GET", "/nope", None)).await;

    assert_error_body(&response, StatusCode::NOT_FOUND, "not_found", "Route does not exist");
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_wrong_method_is_404() {
    let app = setup_app();

    let response = send(&app, empty_request("GET", "/api/v1/auth/login", None)).await;

    assert_error_body(&response, StatusCode::NOT_FOUND, "not_found", "Route does not exist");
}

#[tokio::test]
async fn test_unknown_path_under_jobs_needs_auth_first() {
    let app = setup_app();
    let token = register_user(&app, "Alice", &generate_unique_email("pipeline")).await;

    let anonymous = send(&app, empty_request("GET", "/api/v1/jobs/a/b", None)).await;
    assert_error_body(
        &anonymous,
        StatusCode::UNAUTHORIZED,
        "auth_error",
        "Authentication invalid",
    );

    let authenticated = send(&app, empty_request("GET", "/api/v1/jobs/a/b", Some(&token))).await;
    assert_error_body(
        &authenticated,
        StatusCode::NOT_FOUND,
        "not_found",
        "Route does not exist",
    );
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = setup_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.text);
    assert_eq!(response.body["kind"], "validation_error");
    assert!(
        response.body["msg"]
            .as_str()
            .unwrap()
            .starts_with("Malformed JSON in request body")
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = setup_app();
    let padding = "a".repeat(200 * 1024);
    let request = json_request(
        "POST",
        "/api/v1/auth/register",
        &json!({ "name": padding, "email": "big@example.com", "password": TEST_PASSWORD }),
        None,
    );

    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.text);
    assert_eq!(response.body["kind"], "validation_error");
}

#[tokio::test]
async fn test_markup_in_body_is_escaped() {
    let app = setup_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({
                "name": "<b>Alice</b>",
                "email": generate_unique_email("markup"),
                "password": TEST_PASSWORD
            }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    assert_eq!(response.body["user"]["name"], "&lt;b&gt;Alice&lt;/b&gt;");
}

#[tokio::test]
async fn test_bearer_scheme_is_case_sensitive() {
    let app = setup_app();
    let token = register_user(&app, "Alice", &generate_unique_email("scheme")).await;

    for header in [
        format!("bearer {}", token),
        format!("Token {}", token),
        "Bearer ".to_string(),
        token.clone(),
    ] {
        let request = Request::builder()
            .method("GET")
            .uri("/api/v1/jobs")
            .header("authorization", header)
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_error_body(
            &response,
            StatusCode::UNAUTHORIZED,
            "auth_error",
            "Authentication invalid",
        );
    }
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let app = setup_app();
    let token = register_user(&app, "Alice", &generate_unique_email("tamper")).await;
    let mut tampered = token.into_bytes();
    let target = tampered.len() - 10;
    tampered[target] = if tampered[target] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = send(&app, empty_request("GET", "/api/v1/jobs", Some(&tampered))).await;

    assert_error_body(
        &response,
        StatusCode::UNAUTHORIZED,
        "auth_error",
        "Authentication invalid",
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = setup_app();
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header("origin", "https://jobs.example.com")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let mut config = test_config();
    config.cors.allowed_origins = vec!["https://jobs.example.com".to_string()];
    let app = setup_app_with_config(config);

    let allowed = Request::builder()
        .method("GET")
        .uri("/")
        .header("origin", "https://jobs.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, allowed).await;
    assert_eq!(
        response.headers["access-control-allow-origin"],
        "https://jobs.example.com"
    );
    assert_eq!(response.headers["access-control-allow-credentials"], "true");

    let denied = Request::builder()
        .method("GET")
        .uri("/")
        .header("origin", "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, denied).await;
    assert!(!response.headers.contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_app();

    let response = send(&app, empty_request("GET", "/openapi.json", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    let paths = response.body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/auth/register"));
    assert!(paths.contains_key("/api/v1/auth/login"));
    assert!(paths.contains_key("/api/v1/jobs"));
    assert!(paths.contains_key("/api/v1/jobs/{id}"));
}

async fn exploding_handler() -> &'static str {
    panic!("connection string leaked: postgres://admin:hunter2@db")
}

#[tokio::test]
async fn test_handler_panic_is_normalized_500() {
    let state = test_state(&test_config());
    let app = with_pipeline(Router::new().route("/explode", get(exploding_handler)), state);

    let response = send(&app, empty_request("GET", "/explode", None)).await;

    assert_error_body(
        &response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        INTERNAL_ERROR,
    );
    assert!(!response.text.contains("hunter2"));
    assert!(!response.text.contains("panicked"));
    assert!(response.headers.contains_key("x-request-id"));

    // The server keeps answering after a panic
    let again = send(&app, empty_request("GET", "/explode", None)).await;
    assert_eq!(again.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(again.body["msg"], INTERNAL_ERROR);
}
