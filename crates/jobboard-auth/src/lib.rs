//! # Jobboard Auth
//!
//! Signed, time-bounded identity tokens for the Jobboard API.
//!
//! - [`claims`]: the payload carried by every token
//! - [`jwt`]: issuing and verifying HS256 tokens
//!
//! # Example
//!
//! ```ignore
//! use jobboard_auth::{create_access_token, verify_token};
//! use jobboard_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user.id, &user.name, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user.id.to_string());
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, issue_token, verify_token, verify_token_at};
