use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{AppError, hash_password};
use mbkm_db::ConstraintExt;

use crate::modules::users::model::{CreateUserDto, USER_COLUMNS, User, UserCredentials};

pub struct UserService;

impl UserService {
    /// Hashes the password and inserts the user. Duplicate usernames or
    /// emails are a 409.
    #[instrument(skip(db, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (username, email, password_hash, full_name, phone, role)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .or_conflict("Username or email already exists", "Invalid reference")?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(db)
                .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn find_credentials_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password_hash, role, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(credentials)
    }
}
