use async_trait::async_trait;
use chrono::Utc;
use jobboard_config::DatabaseConfig;
use jobboard_core::AppError;
use jobboard_models::{Job, NewJob, NewUser, UpdateJobDto, User};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::instrument;
use uuid::Uuid;

use crate::store::{JobStore, Store, UserStore};

const JOB_COLUMNS: &str = "id, company, position, status, created_by, created_at, updated_at";

/// Creates a PostgreSQL pool and applies pending migrations.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(|e| AppError::configuration(anyhow::anyhow!("Failed to connect to database: {}", e)))?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::configuration(anyhow::anyhow!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: sqlx::Error) -> AppError {
    AppError::internal(anyhow::Error::new(e).context("Database query failed"))
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::duplicate_key("email");
            }
            db_error(e)
        })
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }
}

#[async_trait]
impl JobStore for PgStore {
    #[instrument(skip(self))]
    async fn list_jobs(&self, owner: Uuid) -> Result<Vec<Job>, AppError> {
        let query = format!(
            "SELECT {} FROM jobs WHERE created_by = $1 ORDER BY created_at ASC, id ASC",
            JOB_COLUMNS
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    #[instrument(skip(self))]
    async fn find_job(&self, owner: Uuid, id: Uuid) -> Result<Option<Job>, AppError> {
        let query = format!(
            "SELECT {} FROM jobs WHERE id = $1 AND created_by = $2",
            JOB_COLUMNS
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    #[instrument(skip(self, job), fields(owner = %job.created_by))]
    async fn create_job(&self, job: NewJob) -> Result<Job, AppError> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO jobs (id, company, position, status, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {}
            "#,
            JOB_COLUMNS
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(Uuid::new_v4())
            .bind(&job.company)
            .bind(&job.position)
            .bind(job.status)
            .bind(job.created_by)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }

    #[instrument(skip(self, changes))]
    async fn update_job(
        &self,
        owner: Uuid,
        id: Uuid,
        changes: &UpdateJobDto,
    ) -> Result<Option<Job>, AppError> {
        let query = format!(
            r#"
            UPDATE jobs
            SET company = COALESCE($3, company),
                position = COALESCE($4, position),
                status = COALESCE($5, status),
                updated_at = $6
            WHERE id = $1 AND created_by = $2
            RETURNING {}
            "#,
            JOB_COLUMNS
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(owner)
            .bind(changes.company.as_deref())
            .bind(changes.position.as_deref())
            .bind(changes.status)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    #[instrument(skip(self))]
    async fn delete_job(&self, owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND created_by = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn close(&self) {
        self.pool.close().await;
    }
}
