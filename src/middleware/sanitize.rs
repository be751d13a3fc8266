//! Markup escaping for request input.
//!
//! `<` and `>` are replaced with `&lt;` and `&gt;` in every string of the
//! parsed JSON body (object keys included) and in every query-string name
//! and value, so stored input cannot inject markup into pages that render
//! it later.

use std::borrow::Cow;

use axum::{
    extract::Request,
    http::{Uri, uri::PathAndQuery},
    middleware::Next,
    response::Response,
};
use jobboard_core::AppError;
use serde_json::{Map, Value};

use super::body::JsonBody;

pub fn escape_markup(input: &str) -> Cow<'_, str> {
    if !input.contains(['<', '>']) {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace('<', "&lt;").replace('>', "&gt;"))
}

/// Escapes every string inside `value` in place.
pub fn sanitize_value(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains(['<', '>']) {
                *s = escape_markup(s).into_owned();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(sanitize_value),
        Value::Object(map) => {
            let entries = std::mem::take(map);
            *map = entries
                .into_iter()
                .map(|(key, mut v)| {
                    sanitize_value(&mut v);
                    (escape_markup(&key).into_owned(), v)
                })
                .collect::<Map<String, Value>>();
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Returns the re-encoded query when any pair needed escaping.
pub fn sanitize_query(query: &str) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
    if !pairs
        .iter()
        .any(|(k, v)| k.contains(['<', '>']) || v.contains(['<', '>']))
    {
        return None;
    }

    let escaped: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (escape_markup(k).into_owned(), escape_markup(v).into_owned()))
        .collect();
    serde_urlencoded::to_string(escaped).ok()
}

pub async fn sanitize_input(mut req: Request, next: Next) -> Result<Response, AppError> {
    if let Some(JsonBody(value)) = req.extensions_mut().get_mut::<JsonBody>() {
        sanitize_value(value);
    }

    if let Some(query) = req.uri().query().and_then(sanitize_query) {
        let path_and_query = PathAndQuery::try_from(format!("{}?{}", req.uri().path(), query))
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query string: {}", e)))?;

        let mut parts = req.uri().clone().into_parts();
        parts.path_and_query = Some(path_and_query);
        *req.uri_mut() = Uri::from_parts(parts)
            .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid request URI: {}", e)))?;
    }

    Ok(next.run(req).await)
}
