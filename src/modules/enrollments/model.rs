use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub program_id: Uuid,
    /// Free-form status, `enrolled` on creation
    pub status: String,
    pub enrolled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEnrollmentDto {
    /// Must be a user with the `student` role. Students may only enroll themselves.
    pub student_id: Uuid,
    /// Must be an active program
    pub program_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEnrollmentStatusDto {
    #[validate(length(min = 1, max = 20, message = "Status must be between 1 and 20 characters"))]
    pub status: String,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EnrollmentFilterParams {
    pub student_id: Option<Uuid>,
    pub program_id: Option<Uuid>,
    #[validate(length(min = 1, max = 20))]
    pub status: Option<String>,
}
