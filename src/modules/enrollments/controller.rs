use axum::extract::State;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{ApiResponse, AppError, MessageResponse, Paginated, PaginationParams};

use crate::middleware::auth::AuthUser;
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, EnrollmentFilterParams, UpdateEnrollmentStatusDto,
};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    params(EnrollmentFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of enrollments", body = ApiResponse<Paginated<Enrollment>>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_enrollments(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<EnrollmentFilterParams>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationParams>,
) -> Result<ApiResponse<Paginated<Enrollment>>, AppError> {
    let enrollments = EnrollmentService::get_enrollments(&state.db, filters, pagination).await?;
    Ok(ApiResponse::ok("Enrollments retrieved successfully", enrollments))
}

#[utoipa::path(
    get,
    path = "/api/v1/enrollments/student/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student user ID"), PaginationParams),
    responses(
        (status = 200, description = "Enrollments of one student", body = ApiResponse<Paginated<Enrollment>>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Students may only view their own enrollments", body = MessageResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_student_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(student_id): ValidatedPath<Uuid>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationParams>,
) -> Result<ApiResponse<Paginated<Enrollment>>, AppError> {
    EnrollmentService::ensure_owner(&auth_user, student_id)?;

    let enrollments =
        EnrollmentService::get_student_enrollments(&state.db, student_id, pagination).await?;
    Ok(ApiResponse::ok("Enrollments retrieved successfully", enrollments))
}

#[utoipa::path(
    get,
    path = "/api/v1/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment details", body = ApiResponse<Enrollment>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Students may only view their own enrollments", body = MessageResponse),
        (status = 404, description = "Enrollment not found", body = MessageResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Enrollment>, AppError> {
    let enrollment = EnrollmentService::get_enrollment(&state.db, id).await?;
    EnrollmentService::ensure_owner(&auth_user, enrollment.student_id)?;

    Ok(ApiResponse::ok("Enrollment retrieved successfully", enrollment))
}

#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created successfully", body = ApiResponse<Enrollment>),
        (status = 400, description = "User is not a student or program is not active", body = MessageResponse),
        (status = 403, description = "Students may only enroll themselves", body = MessageResponse),
        (status = 404, description = "Student or program not found", body = MessageResponse),
        (status = 409, description = "Student is already enrolled in this program", body = MessageResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEnrollmentDto>,
) -> Result<ApiResponse<Enrollment>, AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state.db, &auth_user, dto).await?;
    Ok(ApiResponse::created("Enrollment created successfully", enrollment))
}

#[utoipa::path(
    put,
    path = "/api/v1/enrollments/{id}/status",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    request_body = UpdateEnrollmentStatusDto,
    responses(
        (status = 200, description = "Enrollment status updated successfully", body = ApiResponse<Enrollment>),
        (status = 400, description = "Invalid status", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse),
        (status = 404, description = "Enrollment not found", body = MessageResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_enrollment_status(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEnrollmentStatusDto>,
) -> Result<ApiResponse<Enrollment>, AppError> {
    let enrollment = EnrollmentService::update_status(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Enrollment status updated successfully", enrollment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment deleted successfully", body = MessageResponse),
        (status = 403, description = "Admin only", body = MessageResponse),
        (status = 404, description = "Enrollment not found", body = MessageResponse),
        (status = 409, description = "Enrollment has assessments", body = MessageResponse)
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    EnrollmentService::delete_enrollment(&state.db, id).await?;
    Ok(ApiResponse::message_only("Enrollment deleted successfully"))
}
