use std::sync::Arc;

use jobboard_config::{AppConfig, CorsConfig, JwtConfig, PasswordConfig};
use jobboard_core::AppError;
use jobboard_db::{Store, connect_store};

use crate::middleware::rate_limit::RateLimiter;

/// Shared services, created once at startup and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
    pub rate_limiter: RateLimiter,
    pub trust_proxy: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            store,
            jwt_config: config.jwt.clone(),
            password_config: config.password,
            cors_config: config.cors.clone(),
            rate_limiter: RateLimiter::new(config.rate_limit.clone()),
            trust_proxy: config.server.trust_proxy,
        }
    }
}

pub async fn init_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    let store = connect_store(&config.database).await?;
    Ok(AppState::new(config, store))
}
