use serde::Serialize;
use utoipa::ToSchema;

use mbkm_core::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness check. Does not touch the database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = ApiResponse<HealthStatus>)
    ),
    tag = "Health"
)]
pub async fn health_check() -> ApiResponse<HealthStatus> {
    ApiResponse::ok("MBKM API is running", HealthStatus { status: "ok" })
}
