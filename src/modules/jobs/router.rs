use axum::{Router, routing::get};

use crate::router::not_found;
use crate::state::AppState;

use super::controller::{create_job, delete_job, get_all_jobs, get_job, update_job};

/// Job routes. Unmatched paths and methods under the prefix fall back to
/// the not-found responder, so they stay behind the same auth layer.
pub fn init_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_jobs).post(create_job))
        .route("/{id}", get(get_job).patch(update_job).delete(delete_job))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}
