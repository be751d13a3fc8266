use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use jobboard_core::{AppError, NormalizedError};
use jobboard_models::{AuthResponse, LoginRequest, RegisterRequest};
use tracing::instrument;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid name, email or password", body = NormalizedError),
        (status = 409, description = "Email already registered", body = NormalizedError),
        (status = 429, description = "Too many requests", body = NormalizedError)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(&state, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Email or password missing", body = NormalizedError),
        (status = 401, description = "Invalid credentials", body = NormalizedError),
        (status = 429, description = "Too many requests", body = NormalizedError)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(&state, dto).await?;
    Ok(Json(response))
}
