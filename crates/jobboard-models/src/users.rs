//! User domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A registered user.
///
/// The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A user about to be stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Registration payload.
///
/// Missing fields deserialize as empty strings so they are reported with
/// the same messages as invalid ones.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 50, message = "Please provide name"))]
    #[schema(example = "alice")]
    pub name: String,
    #[serde(default)]
    #[validate(
        email(message = "Please provide a valid email"),
        length(max = 255, message = "Please provide a valid email")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "Please provide password"))]
    #[schema(example = "secret123")]
    pub password: String,
}

/// Login payload. Presence of both fields is checked by the login service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "secret123")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns both credentials when neither is missing or blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().filter(|e| !e.trim().is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub name: String,
}

/// Returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserSummary,
    pub token: String,
}
