//! Job domain models and DTOs.
//!
//! A job is an application a user is tracking. Jobs always belong to the
//! user who created them and are only visible to that user. All job
//! payloads use camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    Interview,
    Declined,
    #[default]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job about to be stored.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Please provide company name"))]
    #[schema(example = "Acme")]
    pub company: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Please provide position"))]
    #[schema(example = "Backend Engineer")]
    pub position: String,
    pub status: Option<JobStatus>,
}

impl CreateJobDto {
    /// Required fields made only of whitespace, with the message the length
    /// rule reports for an empty value.
    pub fn blank_fields(&self) -> Vec<(&'static str, &'static str)> {
        let mut blank = Vec::new();
        if !self.company.is_empty() && self.company.trim().is_empty() {
            blank.push(("company", "Please provide company name"));
        }
        if !self.position.is_empty() && self.position.trim().is_empty() {
            blank.push(("position", "Please provide position"));
        }
        blank
    }

    pub fn into_new_job(self, created_by: Uuid) -> NewJob {
        NewJob {
            company: self.company,
            position: self.position,
            status: self.status.unwrap_or_default(),
            created_by,
        }
    }
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobDto {
    #[validate(length(max = 50, message = "Company name is too long"))]
    pub company: Option<String>,
    #[validate(length(max = 100, message = "Position is too long"))]
    pub position: Option<String>,
    pub status: Option<JobStatus>,
}

impl UpdateJobDto {
    /// True when `company` or `position` is present but empty.
    pub fn has_blank_field(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        blank(&self.company) || blank(&self.position)
    }

    pub fn apply(&self, job: &mut Job) {
        if let Some(company) = &self.company {
            job.company = company.clone();
        }
        if let Some(position) = &self.position {
            job.position = position.clone();
        }
        if let Some(status) = self.status {
            job.status = status;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
    pub count: usize,
}

impl From<Vec<Job>> for JobsResponse {
    fn from(jobs: Vec<Job>) -> Self {
        let count = jobs.len();
        Self { jobs, count }
    }
}
