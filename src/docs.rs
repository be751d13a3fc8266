use jobboard_core::{FieldError, NormalizedError};
use jobboard_models::{
    AuthResponse, CreateJobDto, Job, JobResponse, JobStatus, JobsResponse, LoginRequest,
    RegisterRequest, UpdateJobDto, UserSummary,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::jobs::controller::get_all_jobs,
        crate::modules::jobs::controller::create_job,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::update_job,
        crate::modules::jobs::controller::delete_job,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserSummary,
            Job,
            JobStatus,
            CreateJobDto,
            UpdateJobDto,
            JobResponse,
            JobsResponse,
            NormalizedError,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Jobs", description = "Job applications of the authenticated user")
    ),
    info(
        title = "Jobs API",
        version = "0.1.0",
        description = "Track job applications. Job routes require a bearer token from register or login.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
