use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use jobboard_core::{AppError, FieldError};
use jobboard_models::{CreateJobDto, Job, UpdateJobDto};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::state::AppState;

fn no_item(raw: &str) -> AppError {
    AppError::not_found(anyhow::anyhow!("No item found with id : {}", raw))
}

/// Parses a job id from the path. A malformed id is reported as not found.
pub fn parse_job_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| no_item(raw))
}

/// The `{id}` path segment as a job id.
///
/// A segment that cannot be decoded (invalid UTF-8 after percent-decoding)
/// is reported like any other malformed id, using the raw segment.
#[derive(Debug, Clone, Copy)]
pub struct JobId(pub Uuid);

impl<S> FromRequestParts<S> for JobId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => parse_job_id(&raw).map(JobId),
            Err(rejection) => {
                debug!(error = %rejection, "Job id path segment rejected");
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                Err(no_item(raw))
            }
        }
    }
}

fn no_job(id: Uuid) -> AppError {
    AppError::not_found(anyhow::anyhow!("No job with id {}", id))
}

pub struct JobService;

impl JobService {
    #[instrument(skip(state))]
    pub async fn list(state: &AppState, owner: Uuid) -> Result<Vec<Job>, AppError> {
        state.store.list_jobs(owner).await
    }

    #[instrument(skip(state, dto))]
    pub async fn create(state: &AppState, owner: Uuid, dto: CreateJobDto) -> Result<Job, AppError> {
        let blank = dto.blank_fields();
        if !blank.is_empty() {
            let message = blank.iter().map(|(_, m)| *m).collect::<Vec<_>>().join(", ");
            let fields = blank
                .into_iter()
                .map(|(field, message)| FieldError {
                    field: field.to_string(),
                    message: message.to_string(),
                })
                .collect();
            return Err(AppError::validation(anyhow::anyhow!(message), fields));
        }

        let job = state.store.create_job(dto.into_new_job(owner)).await?;
        info!(job_id = %job.id, "Job created");
        Ok(job)
    }

    #[instrument(skip(state))]
    pub async fn get(state: &AppState, owner: Uuid, id: Uuid) -> Result<Job, AppError> {
        state
            .store
            .find_job(owner, id)
            .await?
            .ok_or_else(|| no_job(id))
    }

    #[instrument(skip(state, dto))]
    pub async fn update(
        state: &AppState,
        owner: Uuid,
        id: Uuid,
        dto: UpdateJobDto,
    ) -> Result<Job, AppError> {
        if dto.has_blank_field() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Company or Position fields cannot be empty"
            )));
        }

        let job = state
            .store
            .update_job(owner, id, &dto)
            .await?
            .ok_or_else(|| no_job(id))?;
        info!(job_id = %job.id, "Job updated");
        Ok(job)
    }

    #[instrument(skip(state))]
    pub async fn delete(state: &AppState, owner: Uuid, id: Uuid) -> Result<(), AppError> {
        if !state.store.delete_job(owner, id).await? {
            return Err(no_job(id));
        }
        info!(job_id = %id, "Job deleted");
        Ok(())
    }
}
