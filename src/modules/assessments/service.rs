use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{AppError, Paginated, PaginationParams};
use mbkm_db::ConstraintExt;

use crate::modules::assessments::model::{
    Assessment, AssessmentFilterParams, CreateAssessmentDto, UpdateAssessmentDto,
};
use crate::modules::enrollments::service::EnrollmentService;

const ASSESSMENT_COLUMNS: &str = "id, enrollment_id, student_id, program_id, category, score, \
     max_score, weight, notes, created_at, updated_at";

pub struct AssessmentService;

/// Cross-field check the `validator` rules cannot express on their own.
fn ensure_score_within_max(score: f64, max_score: f64) -> Result<(), AppError> {
    if score > max_score {
        return Err(AppError::bad_request(anyhow!(
            "Score cannot exceed max score"
        )));
    }
    Ok(())
}

impl AssessmentService {
    #[instrument(skip(db))]
    pub async fn get_assessments(
        db: &PgPool,
        filters: AssessmentFilterParams,
        pagination: PaginationParams,
    ) -> Result<Paginated<Assessment>, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM assessments
               WHERE ($1::uuid IS NULL OR enrollment_id = $1)
                 AND ($2::text IS NULL OR category = $2)"#,
        )
        .bind(filters.enrollment_id)
        .bind(&filters.category)
        .fetch_one(db)
        .await?;

        let assessments = sqlx::query_as::<_, Assessment>(&format!(
            r#"SELECT {ASSESSMENT_COLUMNS} FROM assessments
               WHERE ($1::uuid IS NULL OR enrollment_id = $1)
                 AND ($2::text IS NULL OR category = $2)
               ORDER BY created_at DESC
               LIMIT $3 OFFSET $4"#
        ))
        .bind(filters.enrollment_id)
        .bind(&filters.category)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(Paginated::new(assessments, total, &pagination))
    }

    #[instrument(skip(db))]
    pub async fn get_enrollment_assessments(
        db: &PgPool,
        enrollment_id: Uuid,
        pagination: PaginationParams,
    ) -> Result<Paginated<Assessment>, AppError> {
        let filters = AssessmentFilterParams {
            enrollment_id: Some(enrollment_id),
            ..Default::default()
        };
        Self::get_assessments(db, filters, pagination).await
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Assessment>, AppError> {
        let assessment = sqlx::query_as::<_, Assessment>(&format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM assessments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(assessment)
    }

    #[instrument(skip(db))]
    pub async fn get_assessment(db: &PgPool, id: Uuid) -> Result<Assessment, AppError> {
        Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Assessment not found")))
    }

    /// The student and program are copied from the enrollment so the three
    /// ids can never disagree.
    #[instrument(skip(db, dto), fields(enrollment_id = %dto.enrollment_id, category = %dto.category))]
    pub async fn create_assessment(
        db: &PgPool,
        dto: CreateAssessmentDto,
    ) -> Result<Assessment, AppError> {
        ensure_score_within_max(dto.score, dto.max_score)?;

        let enrollment = EnrollmentService::get_enrollment(db, dto.enrollment_id).await?;

        let assessment = sqlx::query_as::<_, Assessment>(&format!(
            r#"INSERT INTO assessments
                   (enrollment_id, student_id, program_id, category, score, max_score, weight, notes)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {ASSESSMENT_COLUMNS}"#
        ))
        .bind(enrollment.id)
        .bind(enrollment.student_id)
        .bind(enrollment.program_id)
        .bind(&dto.category)
        .bind(dto.score)
        .bind(dto.max_score)
        .bind(dto.weight)
        .bind(&dto.notes)
        .fetch_one(db)
        .await
        .or_conflict("Assessment already exists", "Enrollment not found")?;

        Ok(assessment)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_assessment(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAssessmentDto,
    ) -> Result<Assessment, AppError> {
        if let (Some(score), Some(max_score)) = (dto.score, dto.max_score) {
            ensure_score_within_max(score, max_score)?;
        }

        // A score that only exceeds the stored max is caught by
        // assessments_score_check and surfaces as a 400.
        let assessment = sqlx::query_as::<_, Assessment>(&format!(
            r#"UPDATE assessments
               SET category = COALESCE($1, category),
                   score = COALESCE($2, score),
                   max_score = COALESCE($3, max_score),
                   weight = COALESCE($4, weight),
                   notes = COALESCE($5, notes),
                   updated_at = NOW()
               WHERE id = $6
               RETURNING {ASSESSMENT_COLUMNS}"#
        ))
        .bind(&dto.category)
        .bind(dto.score)
        .bind(dto.max_score)
        .bind(dto.weight)
        .bind(&dto.notes)
        .bind(id)
        .fetch_optional(db)
        .await
        .or_conflict("Assessment already exists", "Enrollment not found")?
        .ok_or_else(|| AppError::not_found(anyhow!("Assessment not found")))?;

        Ok(assessment)
    }

    #[instrument(skip(db))]
    pub async fn delete_assessment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Assessment not found")));
        }

        Ok(())
    }
}
