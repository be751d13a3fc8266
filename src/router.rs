use std::any::Any;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use axum::response::{Html, IntoResponse, Response};
use axum::{Router, middleware, routing::get};
use jobboard_config::CorsConfig;
use jobboard_core::AppError;
use jobboard_observability::logging_middleware;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::auth::require_auth;
use crate::middleware::body::parse_json_body;
use crate::middleware::rate_limit::rate_limit;
use crate::middleware::sanitize::sanitize_input;
use crate::middleware::security_headers::security_headers;
use crate::modules::auth::init_auth_router;
use crate::modules::jobs::init_jobs_router;
use crate::state::AppState;

const LANDING_PAGE: &str = "<h1>Jobs Api</h1><a href='/api-docs'>Documentation</a>";

/// Fallback for any method and path without a route.
pub async fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Route does not exist"))
}

async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::internal(anyhow::anyhow!("Handler panicked: {}", detail)).into_response()
}

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods(methods)
            .allow_headers(cors::Any)
            .max_age(Duration::from_secs(600));
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Credentials cannot be combined with wildcard headers
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(600))
}

/// Wraps `routes` in the request pipeline and binds the state.
pub fn with_pipeline(routes: Router<AppState>, state: AppState) -> Router {
    // Stages run top to bottom on the way in
    routes
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
                .layer(middleware::from_fn(parse_json_body))
                .layer(middleware::from_fn(security_headers))
                .layer(cors_layer(&state.cors_config))
                .layer(middleware::from_fn(sanitize_input)),
        )
        .with_state(state)
}

pub fn init_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(landing))
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1/auth", init_auth_router())
        .nest(
            "/api/v1/jobs",
            init_jobs_router().layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(not_found);

    with_pipeline(routes, state)
}
