//! JSON body parsing.
//!
//! Requests declaring a JSON content type have their body read and parsed
//! once, up front. The parsed value travels in the request extensions as
//! [`JsonBody`] so later stages can sanitize it and handlers can
//! deserialize it.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jobboard_core::AppError;
use serde_json::{Map, Value};

/// Largest accepted request body.
pub const BODY_LIMIT: usize = 100 * 1024;

/// The parsed JSON body of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

impl Default for JsonBody {
    fn default() -> Self {
        JsonBody(Value::Object(Map::new()))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

pub async fn parse_json_body(req: Request, next: Next) -> Result<Response, AppError> {
    if !is_json(req.headers()) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT).await.map_err(|e| {
        AppError::bad_request(anyhow::anyhow!(
            "Request body could not be read or exceeds {} bytes: {}",
            BODY_LIMIT,
            e
        ))
    })?;

    let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
        JsonBody::default()
    } else {
        let value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::bad_request(anyhow::anyhow!("Malformed JSON in request body: {}", e))
        })?;
        JsonBody(value)
    };

    parts.extensions.insert(parsed);
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
