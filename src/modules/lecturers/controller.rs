use axum::extract::State;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{ApiResponse, AppError, MessageResponse, Paginated, PaginationParams};

use crate::modules::lecturers::model::{
    CreateLecturerDto, Lecturer, LecturerFilterParams, UpdateLecturerDto,
};
use crate::modules::lecturers::service::LecturerService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/v1/lecturers",
    params(LecturerFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of lecturers", body = ApiResponse<Paginated<Lecturer>>),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lecturers(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<LecturerFilterParams>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationParams>,
) -> Result<ApiResponse<Paginated<Lecturer>>, AppError> {
    let lecturers = LecturerService::get_lecturers(&state.db, filters, pagination).await?;
    Ok(ApiResponse::ok("Lecturers retrieved successfully", lecturers))
}

#[utoipa::path(
    get,
    path = "/api/v1/lecturers/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer details", body = ApiResponse<Lecturer>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Lecturer not found", body = MessageResponse)
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lecturer(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Lecturer>, AppError> {
    let lecturer = LecturerService::get_lecturer(&state.db, id).await?;
    Ok(ApiResponse::ok("Lecturer retrieved successfully", lecturer))
}

#[utoipa::path(
    post,
    path = "/api/v1/lecturers",
    request_body = CreateLecturerDto,
    responses(
        (status = 201, description = "Lecturer created successfully", body = ApiResponse<Lecturer>),
        (status = 400, description = "Invalid input or user is not a lecturer", body = MessageResponse),
        (status = 403, description = "Admin only", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 409, description = "User or NIDN already registered", body = MessageResponse)
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_lecturer(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateLecturerDto>,
) -> Result<ApiResponse<Lecturer>, AppError> {
    let lecturer = LecturerService::create_lecturer(&state.db, dto).await?;
    Ok(ApiResponse::created("Lecturer created successfully", lecturer))
}

#[utoipa::path(
    put,
    path = "/api/v1/lecturers/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    request_body = UpdateLecturerDto,
    responses(
        (status = 200, description = "Lecturer updated successfully", body = ApiResponse<Lecturer>),
        (status = 400, description = "Invalid input", body = MessageResponse),
        (status = 403, description = "Admin only", body = MessageResponse),
        (status = 404, description = "Lecturer not found", body = MessageResponse),
        (status = 409, description = "NIDN already registered", body = MessageResponse)
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_lecturer(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLecturerDto>,
) -> Result<ApiResponse<Lecturer>, AppError> {
    let lecturer = LecturerService::update_lecturer(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Lecturer updated successfully", lecturer))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lecturers/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer deleted successfully", body = MessageResponse),
        (status = 403, description = "Admin only", body = MessageResponse),
        (status = 404, description = "Lecturer not found", body = MessageResponse),
        (status = 409, description = "Lecturer is referenced by programs", body = MessageResponse)
    ),
    tag = "Lecturers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lecturer(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    LecturerService::delete_lecturer(&state.db, id).await?;
    Ok(ApiResponse::message_only("Lecturer deleted successfully"))
}
