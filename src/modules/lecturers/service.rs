use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{AppError, Paginated, PaginationParams, UserRole};
use mbkm_db::ConstraintExt;

use crate::modules::lecturers::model::{
    CreateLecturerDto, Lecturer, LecturerFilterParams, UpdateLecturerDto,
};
use crate::modules::users::UserService;

const LECTURER_COLUMNS: &str =
    "id, user_id, nidn, full_name, phone, department, is_active, created_at, updated_at";

const DUPLICATE_LECTURER: &str = "Lecturer with this user or NIDN already exists";

pub struct LecturerService;

impl LecturerService {
    #[instrument(skip(db))]
    pub async fn get_lecturers(
        db: &PgPool,
        filters: LecturerFilterParams,
        pagination: PaginationParams,
    ) -> Result<Paginated<Lecturer>, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM lecturers
               WHERE ($1::text IS NULL OR department = $1)
                 AND ($2::boolean IS NULL OR is_active = $2)"#,
        )
        .bind(&filters.department)
        .bind(filters.is_active)
        .fetch_one(db)
        .await?;

        let lecturers = sqlx::query_as::<_, Lecturer>(&format!(
            r#"SELECT {LECTURER_COLUMNS} FROM lecturers
               WHERE ($1::text IS NULL OR department = $1)
                 AND ($2::boolean IS NULL OR is_active = $2)
               ORDER BY created_at DESC
               LIMIT $3 OFFSET $4"#
        ))
        .bind(&filters.department)
        .bind(filters.is_active)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(Paginated::new(lecturers, total, &pagination))
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Lecturer>, AppError> {
        let lecturer = sqlx::query_as::<_, Lecturer>(&format!(
            "SELECT {LECTURER_COLUMNS} FROM lecturers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(lecturer)
    }

    #[instrument(skip(db))]
    pub async fn get_lecturer(db: &PgPool, id: Uuid) -> Result<Lecturer, AppError> {
        Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lecturer not found")))
    }

    /// The referenced user must exist (404) and hold the lecturer role (400).
    #[instrument(skip(db, dto), fields(user_id = %dto.user_id))]
    pub async fn create_lecturer(db: &PgPool, dto: CreateLecturerDto) -> Result<Lecturer, AppError> {
        let user = UserService::find_by_id(db, dto.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if user.role != UserRole::Lecturer {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User is not a lecturer"
            )));
        }

        let lecturer = sqlx::query_as::<_, Lecturer>(&format!(
            r#"INSERT INTO lecturers (user_id, nidn, full_name, phone, department)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {LECTURER_COLUMNS}"#
        ))
        .bind(dto.user_id)
        .bind(&dto.nidn)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&dto.department)
        .fetch_one(db)
        .await
        .or_conflict(DUPLICATE_LECTURER, "User not found")?;

        Ok(lecturer)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_lecturer(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLecturerDto,
    ) -> Result<Lecturer, AppError> {
        let lecturer = sqlx::query_as::<_, Lecturer>(&format!(
            r#"UPDATE lecturers
               SET nidn = COALESCE($1, nidn),
                   full_name = COALESCE($2, full_name),
                   phone = COALESCE($3, phone),
                   department = COALESCE($4, department),
                   is_active = COALESCE($5, is_active),
                   updated_at = NOW()
               WHERE id = $6
               RETURNING {LECTURER_COLUMNS}"#
        ))
        .bind(&dto.nidn)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&dto.department)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(db)
        .await
        .or_conflict(DUPLICATE_LECTURER, "Invalid reference")?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lecturer not found")))?;

        Ok(lecturer)
    }

    #[instrument(skip(db))]
    pub async fn delete_lecturer(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lecturers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .or_referenced("Cannot delete lecturer, it is referenced by one or more programs")?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Lecturer not found")));
        }

        Ok(())
    }
}
