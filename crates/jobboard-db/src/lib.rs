//! # Jobboard DB
//!
//! Persistence for users and jobs behind the [`Store`] interface.
//!
//! Two backends are provided:
//!
//! - [`PgStore`]: PostgreSQL through a SQLx connection pool
//! - [`MemoryStore`]: process-local maps, selected with `DATABASE_URL=memory://`
//!
//! Both report a duplicate email as a `DuplicateKey` [`AppError`] and scope
//! every job query to the owning user.
//!
//! # Example
//!
//! ```ignore
//! use jobboard_db::connect_store;
//!
//! let store = connect_store(&config.database).await?;
//! let jobs = store.list_jobs(user_id).await?;
//! store.close().await;
//! ```

pub mod memory;
pub mod postgres;
mod store;

use std::sync::Arc;

use jobboard_config::DatabaseConfig;
use jobboard_core::AppError;
use tracing::info;

pub use memory::MemoryStore;
pub use postgres::{PgStore, init_db_pool};
pub use store::{JobStore, Store, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens the backend named by `DATABASE_URL`.
pub async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn Store>, AppError> {
    if config.is_memory() {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = init_db_pool(config).await?;
    info!(max_connections = config.max_connections, "Connected to PostgreSQL");
    Ok(Arc::new(PgStore::new(pool)))
}
