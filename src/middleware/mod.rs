//! Request pipeline stages.
//!
//! Every request passes through the stages in this order before reaching
//! route dispatch:
//!
//! 1. [`rate_limit`]: per-client fixed-window request limit
//! 2. [`body`]: JSON body parsing
//! 3. [`security_headers`]: fixed security response headers
//! 4. CORS (`tower_http::cors`, configured in [`crate::router`])
//! 5. [`sanitize`]: markup escaping in body and query values
//!
//! Protected routes then run [`auth::require_auth`], which attaches an
//! [`auth::AuthUser`] to the request. Each stage either continues or
//! returns an [`AppError`](jobboard_core::AppError), which renders the
//! normalized error body.

pub mod auth;
pub mod body;
pub mod rate_limit;
pub mod sanitize;
pub mod security_headers;
