use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A graded component of an enrollment. `student_id` and `program_id`
/// always mirror the referenced enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assessment {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub program_id: Uuid,
    pub category: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_max_score() -> f64 {
    100.0
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssessmentDto {
    pub enrollment_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"))]
    pub category: String,
    #[validate(range(min = 0.0, message = "Score must not be negative"))]
    pub score: f64,
    #[serde(default = "default_max_score")]
    #[validate(range(exclusive_min = 0.0, message = "Max score must be greater than 0"))]
    pub max_score: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "Weight must be between 0 and 100"))]
    pub weight: f64,
    pub notes: Option<String>,
}

/// Absent fields keep their stored value. The enrollment link cannot change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssessmentDto {
    #[validate(length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"))]
    pub category: Option<String>,
    #[validate(range(min = 0.0, message = "Score must not be negative"))]
    pub score: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "Max score must be greater than 0"))]
    pub max_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "Weight must be between 0 and 100"))]
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssessmentFilterParams {
    pub enrollment_id: Option<Uuid>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
}
