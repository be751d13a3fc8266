//! # Jobboard Core
//!
//! Core types shared by every Jobboard crate:
//!
//! - [`errors`]: the application error taxonomy and the error normalizer
//!   that turns any [`AppError`] into the single JSON error envelope
//! - [`password`]: bcrypt password hashing run off the async executor
//!
//! # Example
//!
//! ```ignore
//! use jobboard_core::{AppError, AuthError};
//!
//! let err = AppError::not_found(anyhow::anyhow!("No job with id {}", id));
//! let err: AppError = AuthError::Expired.into();
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, AuthError, ErrorKind, FieldError, NormalizedError};
pub use password::{hash_password, verify_password};
