use axum::{Router, routing::post};

use crate::router::not_found;
use crate::state::AppState;

use super::controller::{login_user, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .method_not_allowed_fallback(not_found)
}
