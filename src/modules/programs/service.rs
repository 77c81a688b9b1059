use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{AppError, Paginated, PaginationParams};
use mbkm_db::ConstraintExt;

use crate::modules::lecturers::service::LecturerService;
use crate::modules::programs::model::{
    CreateProgramDto, Program, ProgramFilterParams, UpdateProgramDto,
};

const PROGRAM_COLUMNS: &str = "id, code, name, description, credits, semester, lecturer_id, is_active, created_at, updated_at";

const DUPLICATE_CODE: &str = "Program code already exists";

pub struct ProgramService;

impl ProgramService {
    #[instrument(skip(db))]
    pub async fn get_programs(
        db: &PgPool,
        filters: ProgramFilterParams,
        pagination: PaginationParams,
    ) -> Result<Paginated<Program>, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM programs
               WHERE ($1::uuid IS NULL OR lecturer_id = $1)
                 AND ($2::integer IS NULL OR semester = $2)
                 AND ($3::boolean IS NULL OR is_active = $3)"#,
        )
        .bind(filters.lecturer_id)
        .bind(filters.semester)
        .bind(filters.is_active)
        .fetch_one(db)
        .await?;

        let programs = sqlx::query_as::<_, Program>(&format!(
            r#"SELECT {PROGRAM_COLUMNS} FROM programs
               WHERE ($1::uuid IS NULL OR lecturer_id = $1)
                 AND ($2::integer IS NULL OR semester = $2)
                 AND ($3::boolean IS NULL OR is_active = $3)
               ORDER BY semester, code
               LIMIT $4 OFFSET $5"#
        ))
        .bind(filters.lecturer_id)
        .bind(filters.semester)
        .bind(filters.is_active)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(Paginated::new(programs, total, &pagination))
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Program>, AppError> {
        let program = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(program)
    }

    #[instrument(skip(db))]
    pub async fn get_program(db: &PgPool, id: Uuid) -> Result<Program, AppError> {
        Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Program not found")))
    }

    /// A program may only be assigned to an existing, active lecturer.
    async fn ensure_active_lecturer(db: &PgPool, lecturer_id: Uuid) -> Result<(), AppError> {
        let lecturer = LecturerService::find_by_id(db, lecturer_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lecturer not found")))?;

        if !lecturer.is_active {
            return Err(AppError::bad_request(anyhow::anyhow!("Lecturer is inactive")));
        }

        Ok(())
    }

    #[instrument(skip(db, dto), fields(code = %dto.code))]
    pub async fn create_program(db: &PgPool, dto: CreateProgramDto) -> Result<Program, AppError> {
        Self::ensure_active_lecturer(db, dto.lecturer_id).await?;

        let program = sqlx::query_as::<_, Program>(&format!(
            r#"INSERT INTO programs (code, name, description, credits, semester, lecturer_id)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {PROGRAM_COLUMNS}"#
        ))
        .bind(&dto.code)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.credits)
        .bind(dto.semester)
        .bind(dto.lecturer_id)
        .fetch_one(db)
        .await
        .or_conflict(DUPLICATE_CODE, "Lecturer not found")?;

        Ok(program)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_program(
        db: &PgPool,
        id: Uuid,
        dto: UpdateProgramDto,
    ) -> Result<Program, AppError> {
        if let Some(lecturer_id) = dto.lecturer_id {
            Self::ensure_active_lecturer(db, lecturer_id).await?;
        }

        let program = sqlx::query_as::<_, Program>(&format!(
            r#"UPDATE programs
               SET code = COALESCE($1, code),
                   name = COALESCE($2, name),
                   description = COALESCE($3, description),
                   credits = COALESCE($4, credits),
                   semester = COALESCE($5, semester),
                   lecturer_id = COALESCE($6, lecturer_id),
                   is_active = COALESCE($7, is_active),
                   updated_at = NOW()
               WHERE id = $8
               RETURNING {PROGRAM_COLUMNS}"#
        ))
        .bind(&dto.code)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.credits)
        .bind(dto.semester)
        .bind(dto.lecturer_id)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(db)
        .await
        .or_conflict(DUPLICATE_CODE, "Lecturer not found")?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Program not found")))?;

        Ok(program)
    }

    #[instrument(skip(db))]
    pub async fn delete_program(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .or_referenced("Cannot delete program, it has enrollments")?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Program not found")));
        }

        Ok(())
    }
}
