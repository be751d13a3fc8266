//! Rate limiting configuration.
//!
//! Requests are counted per client in fixed windows:
//!
//! - `RATE_LIMIT_WINDOW_SECS`: window length in seconds (default: 900)
//! - `RATE_LIMIT_MAX_REQUESTS`: requests allowed per window (default: 100)
//!
//! The counter for a client starts with its first request and resets once
//! the window has elapsed.

use std::time::Duration;

use crate::{ConfigError, parse_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Length of one counting window in seconds.
    pub window_secs: u64,

    /// Requests a single client may make within one window.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 15 * 60,
            max_requests: 100,
        }
    }
}

impl RateLimitConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let window_secs = parse_or(lookup, "RATE_LIMIT_WINDOW_SECS", defaults.window_secs)?;
        let max_requests = parse_or(lookup, "RATE_LIMIT_MAX_REQUESTS", defaults.max_requests)?;

        if window_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "RATE_LIMIT_WINDOW_SECS",
                value: window_secs.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if max_requests == 0 {
            return Err(ConfigError::Invalid {
                name: "RATE_LIMIT_MAX_REQUESTS",
                value: max_requests.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            window_secs,
            max_requests,
        })
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}
