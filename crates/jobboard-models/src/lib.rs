//! # Jobboard Models
//!
//! Domain models and DTOs for the Jobboard API.
//!
//! # Modules
//!
//! - [`users`]: registered users and the register/login payloads
//! - [`jobs`]: job applications tracked by a user
//!
//! # Example
//!
//! ```ignore
//! use jobboard_models::jobs::{CreateJobDto, JobStatus};
//!
//! let dto: CreateJobDto = serde_json::from_value(json!({
//!     "company": "Acme",
//!     "position": "Engineer"
//! }))?;
//! assert_eq!(dto.status, None);
//! assert_eq!(JobStatus::default(), JobStatus::Pending);
//! ```

pub mod jobs;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use jobs::{CreateJobDto, Job, JobResponse, JobStatus, JobsResponse, NewJob, UpdateJobDto};
pub use users::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserSummary};
