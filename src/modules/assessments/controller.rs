use axum::extract::State;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{ApiResponse, AppError, MessageResponse, Paginated, PaginationParams};

use crate::middleware::auth::AuthUser;
use crate::modules::assessments::model::{
    Assessment, AssessmentFilterParams, CreateAssessmentDto, UpdateAssessmentDto,
};
use crate::modules::assessments::service::AssessmentService;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/v1/assessments",
    params(AssessmentFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of assessments", body = ApiResponse<Paginated<Assessment>>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_assessments(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<AssessmentFilterParams>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationParams>,
) -> Result<ApiResponse<Paginated<Assessment>>, AppError> {
    let assessments = AssessmentService::get_assessments(&state.db, filters, pagination).await?;
    Ok(ApiResponse::ok("Assessments retrieved successfully", assessments))
}

#[utoipa::path(
    get,
    path = "/api/v1/assessments/enrollment/{enrollment_id}",
    params(("enrollment_id" = Uuid, Path, description = "Enrollment ID"), PaginationParams),
    responses(
        (status = 200, description = "Assessments of one enrollment", body = ApiResponse<Paginated<Assessment>>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Students may only view their own assessments", body = MessageResponse),
        (status = 404, description = "Enrollment not found", body = MessageResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_enrollment_assessments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(enrollment_id): ValidatedPath<Uuid>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationParams>,
) -> Result<ApiResponse<Paginated<Assessment>>, AppError> {
    let enrollment = EnrollmentService::get_enrollment(&state.db, enrollment_id).await?;
    EnrollmentService::ensure_owner(&auth_user, enrollment.student_id)?;

    let assessments =
        AssessmentService::get_enrollment_assessments(&state.db, enrollment.id, pagination)
            .await?;
    Ok(ApiResponse::ok("Assessments retrieved successfully", assessments))
}

#[utoipa::path(
    get,
    path = "/api/v1/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Assessment details", body = ApiResponse<Assessment>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Students may only view their own assessments", body = MessageResponse),
        (status = 404, description = "Assessment not found", body = MessageResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_assessment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Assessment>, AppError> {
    let assessment = AssessmentService::get_assessment(&state.db, id).await?;
    EnrollmentService::ensure_owner(&auth_user, assessment.student_id)?;

    Ok(ApiResponse::ok("Assessment retrieved successfully", assessment))
}

#[utoipa::path(
    post,
    path = "/api/v1/assessments",
    request_body = CreateAssessmentDto,
    responses(
        (status = 201, description = "Assessment created successfully", body = ApiResponse<Assessment>),
        (status = 400, description = "Invalid score, max score or weight", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse),
        (status = 404, description = "Enrollment not found", body = MessageResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_assessment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAssessmentDto>,
) -> Result<ApiResponse<Assessment>, AppError> {
    let assessment = AssessmentService::create_assessment(&state.db, dto).await?;
    Ok(ApiResponse::created("Assessment created successfully", assessment))
}

#[utoipa::path(
    put,
    path = "/api/v1/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    request_body = UpdateAssessmentDto,
    responses(
        (status = 200, description = "Assessment updated successfully", body = ApiResponse<Assessment>),
        (status = 400, description = "Invalid score, max score or weight", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse),
        (status = 404, description = "Assessment not found", body = MessageResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_assessment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAssessmentDto>,
) -> Result<ApiResponse<Assessment>, AppError> {
    let assessment = AssessmentService::update_assessment(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Assessment updated successfully", assessment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/assessments/{id}",
    params(("id" = Uuid, Path, description = "Assessment ID")),
    responses(
        (status = 200, description = "Assessment deleted successfully", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse),
        (status = 404, description = "Assessment not found", body = MessageResponse)
    ),
    tag = "Assessments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_assessment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    AssessmentService::delete_assessment(&state.db, id).await?;
    Ok(ApiResponse::message_only("Assessment deleted successfully"))
}
