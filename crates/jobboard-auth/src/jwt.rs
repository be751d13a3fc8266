//! Issuing and verifying access tokens.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`. The signature is checked
//! by `jsonwebtoken`, which compares MACs in constant time. Expiry is checked
//! here against an explicit clock value with no leeway: a token whose `exp`
//! is at or before the current second is expired.
//!
//! Verification never touches shared state, so verifying the same token
//! twice at the same instant gives the same result.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use tracing::debug;
use uuid::Uuid;

use jobboard_config::{ConfigError, JwtConfig};
use jobboard_core::{AppError, AuthError};

use crate::claims::Claims;

/// Creates an access token for a user using the configured secret and
/// lifetime.
///
/// # Errors
///
/// Fails with a configuration error when the secret is empty.
pub fn create_access_token(
    user_id: Uuid,
    name: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue_token(
        user_id,
        name,
        &jwt_config.secret,
        jwt_config.access_token_expiry,
    )
}

/// Signs a token for `user_id` that expires `ttl_secs` seconds from now.
pub fn issue_token(
    user_id: Uuid,
    name: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    if secret.is_empty() {
        return Err(AppError::configuration(ConfigError::Empty("JWT_SECRET")));
    }

    let now = Utc::now().timestamp().max(0);
    let exp = now.saturating_add(ttl_secs.max(0));

    let claims = Claims {
        sub: user_id.to_string(),
        name: name.to_string(),
        exp: exp as usize,
        iat: now as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies a token against the current wall clock.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    verify_token_at(token, &jwt_config.secret, Utc::now().timestamp())
}

/// Verifies a token's signature, then its expiry against `now` (Unix
/// seconds).
pub fn verify_token_at(token: &str, secret: &str, now: i64) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => AuthError::Expired,
        other => {
            debug!(error = ?other, "Token rejected");
            AuthError::InvalidSignature
        }
    })?;

    if (claims.exp as i64) <= now {
        return Err(AuthError::Expired);
    }

    Ok(claims)
}
