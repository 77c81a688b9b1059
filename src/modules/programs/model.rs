use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Program {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
    pub semester: i32,
    pub lecturer_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_credits() -> i32 {
    3
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProgramDto {
    #[validate(length(min = 1, max = 20, message = "Code must be between 1 and 20 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_credits")]
    #[validate(range(min = 1, max = 40, message = "Credits must be between 1 and 40"))]
    pub credits: i32,
    #[validate(range(min = 1, max = 14, message = "Semester must be between 1 and 14"))]
    pub semester: i32,
    /// Must reference an active lecturer
    pub lecturer_id: Uuid,
}

/// Absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProgramDto {
    #[validate(length(min = 1, max = 20, message = "Code must be between 1 and 20 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 40, message = "Credits must be between 1 and 40"))]
    pub credits: Option<i32>,
    #[validate(range(min = 1, max = 14, message = "Semester must be between 1 and 14"))]
    pub semester: Option<i32>,
    pub lecturer_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgramFilterParams {
    pub lecturer_id: Option<Uuid>,
    #[validate(range(min = 1))]
    pub semester: Option<i32>,
    pub is_active: Option<bool>,
}
