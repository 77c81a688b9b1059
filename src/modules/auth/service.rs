use sqlx::PgPool;
use tracing::instrument;

use mbkm_auth::create_access_token;
use mbkm_config::JwtConfig;
use mbkm_core::{AppError, PasswordError, verify_password};

use crate::metrics::{track_user_login_failure, track_user_login_success, track_user_registered};
use crate::modules::users::UserService;

use super::model::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let user = UserService::create_user(db, dto).await?;
        let token = create_access_token(user.id, &user.email, user.role, jwt_config)?;

        track_user_registered(user.role);
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(AuthResponse { token, user })
    }

    /// The password is checked before the active flag, so an inactive
    /// account only reveals itself to someone who knows its password.
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let Some(credentials) = UserService::find_credentials_by_email(db, &dto.email).await?
        else {
            track_user_login_failure("unknown_email");
            return Err(PasswordError::Mismatch.into());
        };

        if let Err(err) = verify_password(&dto.password, &credentials.password_hash) {
            track_user_login_failure("invalid_password");
            return Err(err.into());
        }

        if !credentials.is_active {
            track_user_login_failure("inactive");
            return Err(AppError::forbidden("Account is inactive"));
        }

        let token = create_access_token(
            credentials.id,
            &credentials.email,
            credentials.role,
            jwt_config,
        )?;
        let user = UserService::get_user(db, credentials.id).await?;

        track_user_login_success(user.role);

        Ok(AuthResponse { token, user })
    }
}
