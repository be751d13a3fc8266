mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_register_returns_token_and_name() {
    let app = setup_app();
    let email = generate_unique_email("register");

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({ "name": "Alice", "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    assert_eq!(response.body["user"]["name"], "Alice");
    let token = response.body["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
    assert!(response.body["user"].get("password").is_none());
    assert!(!response.text.contains("password_hash"));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = setup_app();
    let email = generate_unique_email("duplicate");
    register_user(&app, "Alice", &email).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({ "name": "Another Alice", "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_error_body(
        &response,
        StatusCode::CONFLICT,
        "duplicate_key",
        "Duplicate value entered for email field, please choose another value",
    );
    assert_eq!(response.body["fields"][0]["field"], "email");
}

#[tokio::test]
async fn test_register_validation_errors_list_fields() {
    let app = setup_app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({ "name": "Al", "email": "not-an-email", "password": "123" }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.text);
    assert_eq!(response.body["kind"], "validation_error");
    assert_eq!(response.body["status"], 400);

    let fields: Vec<&str> = response.body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn test_register_with_empty_body_is_rejected() {
    let app = setup_app();

    let response = send(&app, empty_request("POST", "/api/v1/auth/register", None)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.text);
    assert_eq!(response.body["kind"], "validation_error");
}

#[tokio::test]
async fn test_login_success() {
    let app = setup_app();
    let email = generate_unique_email("login");
    register_user(&app, "Alice", &email).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            &json!({ "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.text);
    assert_eq!(response.body["user"]["name"], "Alice");
    assert!(response.body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = setup_app();

    for body in [
        json!({}),
        json!({ "email": "alice@example.com" }),
        json!({ "password": TEST_PASSWORD }),
        json!({ "email": "", "password": TEST_PASSWORD }),
    ] {
        let response = send(
            &app,
            json_request("POST", "/api/v1/auth/login", &body, None),
        )
        .await;
        assert_error_body(
            &response,
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Please provide email and password",
        );
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup_app();
    let email = generate_unique_email("login-fail");
    register_user(&app, "Alice", &email).await;

    let wrong_password = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            &json!({ "email": email, "password": "wrong-password" }),
            None,
        ),
    )
    .await;
    let unknown_email = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            &json!({ "email": generate_unique_email("nobody"), "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_error_body(
        &wrong_password,
        StatusCode::UNAUTHORIZED,
        "auth_error",
        "Authentication invalid",
    );
    assert_eq!(wrong_password.status, unknown_email.status);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_login_token_authenticates_jobs_requests() {
    let app = setup_app();
    let email = generate_unique_email("login-token");
    register_user(&app, "Alice", &email).await;

    let login = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            &json!({ "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;
    let token = login.body["token"].as_str().unwrap();

    let response = send(&app, empty_request("GET", "/api/v1/jobs", Some(token))).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text);
    assert_eq!(response.body["count"], 0);
}
