//! Token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required, non-empty)
//! - `JWT_LIFETIME`: token lifetime, either plain seconds (`3600`) or a
//!   number with a `s`, `m`, `h` or `d` suffix (`30d`). Default `30d`.

use std::fmt;

use crate::ConfigError;

const DEFAULT_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds
    pub access_token_expiry: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Empty("JWT_SECRET"));
        }

        let access_token_expiry = match lookup("JWT_LIFETIME") {
            None => DEFAULT_LIFETIME_SECS,
            Some(raw) => parse_lifetime(&raw).ok_or_else(|| ConfigError::Invalid {
                name: "JWT_LIFETIME",
                value: raw.clone(),
                reason: "expected seconds or a number followed by s, m, h or d".to_string(),
            })?,
        };

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

/// Parses `"3600"`, `"90s"`, `"15m"`, `"12h"` or `"30d"` into seconds.
pub fn parse_lifetime(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.char_indices().last()? {
        (idx, 's') => (&raw[..idx], 1),
        (idx, 'm') => (&raw[..idx], 60),
        (idx, 'h') => (&raw[..idx], 60 * 60),
        (idx, 'd') => (&raw[..idx], 24 * 60 * 60),
        _ => (raw, 1),
    };

    let value: i64 = digits.trim().parse().ok()?;
    if value <= 0 {
        return None;
    }
    value.checked_mul(multiplier)
}
