use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use jobboard_core::{AppError, NormalizedError};
use jobboard_models::{CreateJobDto, JobResponse, JobsResponse, UpdateJobDto};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::{JobId, JobService};

/// List the caller's jobs
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses(
        (status = 200, description = "Jobs created by the caller, oldest first", body = JobsResponse),
        (status = 401, description = "Missing or invalid token", body = NormalizedError)
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_all_jobs(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = JobService::list(&state, auth_user.user_id).await?;
    Ok(Json(JobsResponse::from(jobs)))
}

/// Create a job
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = CreateJobDto,
    responses(
        (status = 201, description = "Job created", body = JobResponse),
        (status = 400, description = "Invalid company, position or status", body = NormalizedError),
        (status = 401, description = "Missing or invalid token", body = NormalizedError)
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.user_id))]
pub async fn create_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateJobDto>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let job = JobService::create(&state, auth_user.user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// Get one of the caller's jobs
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job found", body = JobResponse),
        (status = 401, description = "Missing or invalid token", body = NormalizedError),
        (status = 404, description = "No such job for the caller", body = NormalizedError)
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JobId(id): JobId,
) -> Result<Json<JobResponse>, AppError> {
    let job = JobService::get(&state, auth_user.user_id, id).await?;
    Ok(Json(JobResponse { job }))
}

/// Update one of the caller's jobs
#[utoipa::path(
    patch,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    request_body = UpdateJobDto,
    responses(
        (status = 200, description = "Job updated", body = JobResponse),
        (status = 400, description = "Company or position empty", body = NormalizedError),
        (status = 401, description = "Missing or invalid token", body = NormalizedError),
        (status = 404, description = "No such job for the caller", body = NormalizedError)
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = %auth_user.user_id))]
pub async fn update_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JobId(id): JobId,
    ValidatedJson(dto): ValidatedJson<UpdateJobDto>,
) -> Result<Json<JobResponse>, AppError> {
    let job = JobService::update(&state, auth_user.user_id, id, dto).await?;
    Ok(Json(JobResponse { job }))
}

/// Delete one of the caller's jobs
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job deleted"),
        (status = 401, description = "Missing or invalid token", body = NormalizedError),
        (status = 404, description = "No such job for the caller", body = NormalizedError)
    ),
    tag = "Jobs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn delete_job(
    State(state): State<AppState>,
    auth_user: AuthUser,
    JobId(id): JobId,
) -> Result<StatusCode, AppError> {
    JobService::delete(&state, auth_user.user_id, id).await?;
    Ok(StatusCode::OK)
}
