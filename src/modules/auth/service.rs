use jobboard_auth::create_access_token;
use jobboard_core::{AppError, AuthError, hash_password, verify_password};
use jobboard_models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, UserSummary};
use tracing::{info, instrument};

use crate::state::AppState;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state, dto))]
    pub async fn register(state: &AppState, dto: RegisterRequest) -> Result<AuthResponse, AppError> {
        let password_hash = hash_password(&dto.password, state.password_config.cost).await?;

        let user = state
            .store
            .create_user(NewUser {
                name: dto.name,
                email: dto.email,
                password_hash,
            })
            .await?;

        let token = create_access_token(user.id, &user.name, &state.jwt_config)?;
        info!(user_id = %user.id, "User registered");

        Ok(AuthResponse {
            user: UserSummary { name: user.name },
            token,
        })
    }

    /// Unknown emails and wrong passwords fail the same way.
    #[instrument(skip(state, dto))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        let (email, password) = dto.credentials().ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Please provide email and password"))
        })?;

        let user = state
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = create_access_token(user.id, &user.name, &state.jwt_config)?;
        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            user: UserSummary { name: user.name },
            token,
        })
    }
}
