use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use jobboard_auth::{Claims, verify_token};
use jobboard_core::{AppError, AuthError};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// The authenticated caller, attached to the request by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

/// Returns the token of an `Authorization: Bearer <token>` header.
///
/// Any other shape (other scheme, lowercase `bearer`, missing or blank
/// token, trailing data after the token) counts as no credential.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Rejects the request unless it carries a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::Missing)?;
    let claims = verify_token(token, &state.jwt_config)?;
    let user_id = claims.user_id()?;

    debug!(user_id = %user_id, "Request authenticated");
    req.extensions_mut().insert(AuthUser { user_id, claims });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(AuthError::Missing))
    }
}
