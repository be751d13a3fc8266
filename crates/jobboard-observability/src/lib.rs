//! # Jobboard Observability
//!
//! Structured logging for the Jobboard API.
//!
//! - [`init_tracing`] installs the global subscriber: a console layer
//!   (compact, or JSON with `LOG_FORMAT=json`) filtered by `RUST_LOG`, plus
//!   a daily rolling JSON file under `LOG_DIR` when that variable is set.
//! - [`logging_middleware`] logs every request with a generated request id,
//!   its status and latency.
//!
//! # Example
//!
//! ```ignore
//! use jobboard_observability::{LoggingConfig, init_tracing, logging_middleware};
//!
//! let _guard = init_tracing(&LoggingConfig::from_env())?;
//! let app = Router::new().layer(axum::middleware::from_fn(logging_middleware));
//! ```

mod logging;

pub use logging::{
    DEFAULT_FILTER, LogFormat, LoggingConfig, REQUEST_ID_HEADER, init_tracing, logging_middleware,
};
