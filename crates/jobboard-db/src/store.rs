use async_trait::async_trait;
use jobboard_core::AppError;
use jobboard_models::{Job, NewJob, NewUser, UpdateJobDto, User};
use uuid::Uuid;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user; a taken email is a `DuplicateKey` error.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Job persistence. Every lookup is keyed by owner as well as id, so a job
/// owned by someone else behaves exactly like a missing one.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Jobs created by `owner`, oldest first.
    async fn list_jobs(&self, owner: Uuid) -> Result<Vec<Job>, AppError>;

    async fn find_job(&self, owner: Uuid, id: Uuid) -> Result<Option<Job>, AppError>;

    async fn create_job(&self, job: NewJob) -> Result<Job, AppError>;

    async fn update_job(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &UpdateJobDto,
    ) -> Result<Option<Job>, AppError>;

    /// Returns whether a job was removed.
    async fn delete_job(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait Store: UserStore + JobStore {
    /// Releases the backend's connections. Called once on shutdown.
    async fn close(&self);
}
