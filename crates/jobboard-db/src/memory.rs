//! In-process store used for local runs and the integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use jobboard_core::AppError;
use jobboard_models::{Job, NewJob, NewUser, UpdateJobDto, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{JobStore, Store, UserStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    jobs: RwLock<Vec<Job>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::duplicate_key("email"));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

// Jobs are kept in insertion order, which is creation order.
#[async_trait]
impl JobStore for MemoryStore {
    async fn list_jobs(&self, owner: Uuid) -> Result<Vec<Job>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .filter(|j| j.created_by == owner)
            .cloned()
            .collect())
    }

    async fn find_job(&self, owner: Uuid, id: Uuid) -> Result<Option<Job>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .find(|j| j.id == id && j.created_by == owner)
            .cloned())
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, AppError> {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            company: job.company,
            position: job.position,
            status: job.status,
            created_by: job.created_by,
            created_at: now,
            updated_at: now,
        };
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn update_job(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &UpdateJobDto,
    ) -> Result<Option<Job>, AppError> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs
            .iter_mut()
            .find(|j| j.id == id && j.created_by == owner)
        else {
            return Ok(None);
        };

        changes.apply(job);
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn delete_job(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| !(j.id == id && j.created_by == owner));
        Ok(jobs.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn close(&self) {
        self.users.write().await.clear();
        self.jobs.write().await.clear();
    }
}
