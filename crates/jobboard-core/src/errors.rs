//! Application errors and the error normalizer.
//!
//! Every failing stage of the request pipeline (body parsing, rate limiting,
//! authentication, handlers, persistence) returns an [`AppError`]. Its
//! [`IntoResponse`] implementation is the only place an error body is
//! rendered, so each failed request produces exactly one [`NormalizedError`].
//!
//! | Kind | Status | Message |
//! |------|--------|---------|
//! | `Validation` | 400 | specific, with optional field detail |
//! | `Auth` | 401 | generic, the sub-reason is only logged |
//! | `NotFound` | 404 | names the missing resource |
//! | `DuplicateKey` | 409 | names the conflicting field |
//! | `RateLimited` | 429 | retry hint |
//! | `Configuration` / `Internal` | 500 | generic, detail only logged |

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message returned for every authentication failure.
pub const AUTHENTICATION_FAILED: &str = "Authentication invalid";

/// Message returned for internal and configuration failures.
pub const INTERNAL_ERROR: &str = "Something went wrong, please try again later";

/// Why a request failed authentication.
///
/// The variant is logged but never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header, or not of the exact `Bearer <token>` shape.
    #[error("missing or malformed authorization header")]
    Missing,
    /// The token is malformed or its signature does not match.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token's expiry is not after the current time.
    #[error("token has expired")]
    Expired,
    /// Login with an unknown email or a wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth(AuthError),
    NotFound,
    DuplicateKey,
    RateLimited,
    Configuration,
    Internal,
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth(_) => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::DuplicateKey => StatusCode::CONFLICT,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Configuration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable identifier written to the `kind` field of the envelope.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::Auth(_) => "auth_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::DuplicateKey => "duplicate_key",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Configuration | ErrorKind::Internal => "internal_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation message attached to one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// The JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NormalizedError {
    /// Human readable message
    pub msg: String,
    /// Error kind, e.g. `validation_error`
    pub kind: String,
    /// HTTP status code, repeated for clients that only see the body
    pub status: u16,
    /// Field-level validation detail
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    pub fields: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            fields: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn configuration<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Configuration, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    /// Validation failure carrying per-field messages.
    pub fn validation<E>(err: E, fields: Vec<FieldError>) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind: ErrorKind::Validation,
            error: err.into(),
            fields,
        }
    }

    pub fn unauthorized(reason: AuthError) -> Self {
        Self::new(ErrorKind::Auth(reason), reason)
    }

    /// Unique-constraint violation on `field`.
    pub fn duplicate_key(field: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateKey,
            anyhow::anyhow!(
                "Duplicate value entered for {} field, please choose another value",
                field
            ),
        )
        .with_fields(vec![FieldError {
            field: field.to_string(),
            message: "already exists".to_string(),
        }])
    }

    pub fn too_many_requests() -> Self {
        Self::new(
            ErrorKind::RateLimited,
            anyhow::anyhow!("Too many requests, please try again later."),
        )
    }

    pub fn with_fields(mut self, fields: Vec<FieldError>) -> Self {
        self.fields = fields;
        self
    }

    /// Maps this error to its status and client-facing envelope.
    ///
    /// Authentication and internal failures get a fixed message so the
    /// response never reveals why a token was rejected or what broke.
    pub fn normalize(&self) -> (StatusCode, NormalizedError) {
        let status = self.kind.status();
        let msg = match self.kind {
            ErrorKind::Auth(_) => AUTHENTICATION_FAILED.to_string(),
            ErrorKind::Configuration | ErrorKind::Internal => INTERNAL_ERROR.to_string(),
            _ => self.error.to_string(),
        };
        let fields = match self.kind {
            ErrorKind::Validation | ErrorKind::DuplicateKey => self.fields.clone(),
            _ => Vec::new(),
        };

        (
            status,
            NormalizedError {
                msg,
                kind: self.kind.as_str().to_string(),
                status: status.as_u16(),
                fields,
            },
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::Configuration | ErrorKind::Internal => {
                error!(kind = %self.kind, error = ?self.error, "Request failed with internal error");
            }
            ErrorKind::Auth(reason) => {
                debug!(reason = %reason, "Request failed authentication");
            }
            _ => {
                debug!(kind = %self.kind, error = %self.error, "Request rejected");
            }
        }

        let (status, body) = self.normalize();
        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(reason: AuthError) -> Self {
        AppError::unauthorized(reason)
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = field_errors(&errors);
        let message = fields
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        AppError::validation(anyhow::anyhow!(message), fields)
    }
}

/// Flattens validator output into one entry per message, ordered by field.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}
