#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use jobboard::router::init_router;
use jobboard::state::AppState;
use jobboard_config::{
    AppConfig, CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig, RateLimitConfig,
    ServerConfig,
};
use jobboard_db::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key";
pub const TEST_PASSWORD: &str = "secret123";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "memory://".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        cors: CorsConfig::default(),
        rate_limit: RateLimitConfig::default(),
        // Lowest cost bcrypt accepts, keeps the suite fast
        password: PasswordConfig { cost: 4 },
    }
}

pub fn setup_app() -> Router {
    setup_app_with_config(test_config())
}

pub fn test_state(config: &AppConfig) -> AppState {
    AppState::new(config, Arc::new(MemoryStore::new()))
}

pub fn setup_app_with_config(config: AppConfig) -> Router {
    init_router(test_state(&config))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        text,
        body,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn generate_unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

/// Registers a user and returns its token.
pub async fn register_user(app: &Router, name: &str, email: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            &json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    response.body["token"].as_str().unwrap().to_string()
}

/// Creates a job for the token's owner and returns the job JSON.
pub async fn create_job(app: &Router, token: &str, company: &str, position: &str) -> Value {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/v1/jobs",
            &json!({ "company": company, "position": position }),
            Some(token),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    response.body["job"].clone()
}

pub fn assert_error_body(response: &TestResponse, status: StatusCode, kind: &str, msg: &str) {
    assert_eq!(response.status, status, "{}", response.text);
    assert_eq!(response.body["status"], status.as_u16());
    assert_eq!(response.body["kind"], kind);
    assert_eq!(response.body["msg"], msg);
}
