use axum::extract::State;
use tracing::instrument;

use mbkm_core::{ApiResponse, AppError, MessageResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::users::{User, UserService};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, LoginRequest, RegisterRequest};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 409, description = "Username or email already exists", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = AuthService::register(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::created("User registered successfully", response))
}

/// Login and receive a JWT
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Invalid email or password", body = MessageResponse),
        (status = 403, description = "Account is inactive", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::ok("Login successful", response))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<User>, AppError> {
    let user = UserService::get_user(&state.db, auth_user.user_id()).await?;
    Ok(ApiResponse::ok("User retrieved successfully", user))
}
