use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use jobboard_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::middleware::body::JsonBody;

/// Deserializes and validates the request's parsed JSON body.
///
/// Reads the [`JsonBody`] left by the body parsing stage; a request without
/// a JSON body is treated as `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn deserialize_error(err: serde_json::Error) -> AppError {
    let message = err.to_string();

    if let Some(rest) = message.split("missing field `").nth(1) {
        let field = rest.split('`').next().unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if message.starts_with("unknown variant") {
        return AppError::bad_request(anyhow!("Invalid value: {}", message));
    }

    if message.starts_with("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

impl<T, S> FromRequestParts<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(body) = parts
            .extensions
            .get::<JsonBody>()
            .cloned()
            .unwrap_or_default();

        let value: T = serde_json::from_value(body).map_err(deserialize_error)?;
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
