//! # Jobboard Config
//!
//! Configuration types for the Jobboard API, loaded from environment
//! variables:
//!
//! - [`server`]: bind address, proxy trust and database connection settings
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed cross-origin callers
//! - [`rate_limit`]: fixed-window request limits
//! - [`password`]: bcrypt cost
//!
//! Every loader has a `from_lookup` variant taking a closure, so tests can
//! feed values without touching the process environment. Any missing
//! required value or unparsable value is a [`ConfigError`], which stops the
//! server from starting.
//!
//! # Example
//!
//! ```ignore
//! use jobboard_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! ```

pub mod cors;
pub mod error;
pub mod jwt;
pub mod password;
pub mod rate_limit;
pub mod server;

use std::str::FromStr;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{DatabaseConfig, ServerConfig};

/// Everything the server needs at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
    pub password: PasswordConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
            rate_limit: RateLimitConfig::from_lookup(&lookup)?,
            password: PasswordConfig::from_lookup(&lookup)?,
        })
    }
}

/// Reads `name` and parses it, falling back to `default` when unset.
pub(crate) fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
