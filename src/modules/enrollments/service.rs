use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{AppError, Paginated, PaginationParams, UserRole};
use mbkm_db::ConstraintExt;

use crate::metrics::track_enrollment_created;
use crate::middleware::auth::AuthUser;
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, EnrollmentFilterParams, UpdateEnrollmentStatusDto,
};
use crate::modules::programs::service::ProgramService;
use crate::modules::users::UserService;

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, program_id, status, enrolled_at, created_at, updated_at";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Students may only act on their own enrollments.
    pub fn ensure_owner(caller: &AuthUser, student_id: Uuid) -> Result<(), AppError> {
        if caller.is_student() && caller.user_id() != student_id {
            return Err(AppError::forbidden("Access denied"));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_enrollments(
        db: &PgPool,
        filters: EnrollmentFilterParams,
        pagination: PaginationParams,
    ) -> Result<Paginated<Enrollment>, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM enrollments
               WHERE ($1::uuid IS NULL OR student_id = $1)
                 AND ($2::uuid IS NULL OR program_id = $2)
                 AND ($3::text IS NULL OR status = $3)"#,
        )
        .bind(filters.student_id)
        .bind(filters.program_id)
        .bind(&filters.status)
        .fetch_one(db)
        .await?;

        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            r#"SELECT {ENROLLMENT_COLUMNS} FROM enrollments
               WHERE ($1::uuid IS NULL OR student_id = $1)
                 AND ($2::uuid IS NULL OR program_id = $2)
                 AND ($3::text IS NULL OR status = $3)
               ORDER BY enrolled_at DESC
               LIMIT $4 OFFSET $5"#
        ))
        .bind(filters.student_id)
        .bind(filters.program_id)
        .bind(&filters.status)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(Paginated::new(enrollments, total, &pagination))
    }

    #[instrument(skip(db))]
    pub async fn get_student_enrollments(
        db: &PgPool,
        student_id: Uuid,
        pagination: PaginationParams,
    ) -> Result<Paginated<Enrollment>, AppError> {
        let filters = EnrollmentFilterParams {
            student_id: Some(student_id),
            ..Default::default()
        };
        Self::get_enrollments(db, filters, pagination).await
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Enrollment>, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn get_enrollment(db: &PgPool, id: Uuid) -> Result<Enrollment, AppError> {
        Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))
    }

    #[instrument(skip(db, caller, dto), fields(student_id = %dto.student_id, program_id = %dto.program_id))]
    pub async fn create_enrollment(
        db: &PgPool,
        caller: &AuthUser,
        dto: CreateEnrollmentDto,
    ) -> Result<Enrollment, AppError> {
        Self::ensure_owner(caller, dto.student_id)?;

        let student = UserService::find_by_id(db, dto.student_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        if student.role != UserRole::Student {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User is not a student"
            )));
        }

        let program = ProgramService::find_by_id(db, dto.program_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Program not found")))?;

        if !program.is_active {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Program is not active"
            )));
        }

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            r#"INSERT INTO enrollments (student_id, program_id)
               VALUES ($1, $2)
               RETURNING {ENROLLMENT_COLUMNS}"#
        ))
        .bind(dto.student_id)
        .bind(dto.program_id)
        .fetch_one(db)
        .await
        .or_conflict(
            "Student is already enrolled in this program",
            "Student or program not found",
        )?;

        track_enrollment_created();

        Ok(enrollment)
    }

    #[instrument(skip(db, dto), fields(status = %dto.status))]
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        dto: UpdateEnrollmentStatusDto,
    ) -> Result<Enrollment, AppError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            r#"UPDATE enrollments
               SET status = $1, updated_at = NOW()
               WHERE id = $2
               RETURNING {ENROLLMENT_COLUMNS}"#
        ))
        .bind(&dto.status)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Enrollment not found")))?;

        Ok(enrollment)
    }

    #[instrument(skip(db))]
    pub async fn delete_enrollment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .or_referenced("Cannot delete enrollment, it has assessments")?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }

        Ok(())
    }
}
