use axum::extract::State;
use tracing::instrument;
use uuid::Uuid;

use mbkm_core::{ApiResponse, AppError, MessageResponse, Paginated, PaginationParams};

use crate::modules::programs::model::{
    CreateProgramDto, Program, ProgramFilterParams, UpdateProgramDto,
};
use crate::modules::programs::service::ProgramService;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/api/v1/programs",
    params(ProgramFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of programs", body = ApiResponse<Paginated<Program>>),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_programs(
    State(state): State<AppState>,
    ValidatedQuery(filters): ValidatedQuery<ProgramFilterParams>,
    ValidatedQuery(pagination): ValidatedQuery<PaginationParams>,
) -> Result<ApiResponse<Paginated<Program>>, AppError> {
    let programs = ProgramService::get_programs(&state.db, filters, pagination).await?;
    Ok(ApiResponse::ok("Programs retrieved successfully", programs))
}

#[utoipa::path(
    get,
    path = "/api/v1/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program details", body = ApiResponse<Program>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Program not found", body = MessageResponse)
    ),
    tag = "Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_program(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<Program>, AppError> {
    let program = ProgramService::get_program(&state.db, id).await?;
    Ok(ApiResponse::ok("Program retrieved successfully", program))
}

#[utoipa::path(
    post,
    path = "/api/v1/programs",
    request_body = CreateProgramDto,
    responses(
        (status = 201, description = "Program created successfully", body = ApiResponse<Program>),
        (status = 400, description = "Invalid input or lecturer inactive", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse),
        (status = 404, description = "Lecturer not found", body = MessageResponse),
        (status = 409, description = "Program code already exists", body = MessageResponse)
    ),
    tag = "Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_program(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProgramDto>,
) -> Result<ApiResponse<Program>, AppError> {
    let program = ProgramService::create_program(&state.db, dto).await?;
    Ok(ApiResponse::created("Program created successfully", program))
}

#[utoipa::path(
    put,
    path = "/api/v1/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    request_body = UpdateProgramDto,
    responses(
        (status = 200, description = "Program updated successfully", body = ApiResponse<Program>),
        (status = 400, description = "Invalid input or lecturer inactive", body = MessageResponse),
        (status = 403, description = "Admin or lecturer only", body = MessageResponse),
        (status = 404, description = "Program or lecturer not found", body = MessageResponse),
        (status = 409, description = "Program code already exists", body = MessageResponse)
    ),
    tag = "Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_program(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateProgramDto>,
) -> Result<ApiResponse<Program>, AppError> {
    let program = ProgramService::update_program(&state.db, id, dto).await?;
    Ok(ApiResponse::ok("Program updated successfully", program))
}

#[utoipa::path(
    delete,
    path = "/api/v1/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program deleted successfully", body = MessageResponse),
        (status = 403, description = "Admin only", body = MessageResponse),
        (status = 404, description = "Program not found", body = MessageResponse),
        (status = 409, description = "Program has enrollments", body = MessageResponse)
    ),
    tag = "Programs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_program(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    ProgramService::delete_program(&state.db, id).await?;
    Ok(ApiResponse::message_only("Program deleted successfully"))
}
