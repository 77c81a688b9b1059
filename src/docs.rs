use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use mbkm_core::{MessageResponse, PaginationMeta, UserRole};

use crate::modules::assessments::model::{Assessment, CreateAssessmentDto, UpdateAssessmentDto};
use crate::modules::auth::model::{AuthResponse, LoginRequest};
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, UpdateEnrollmentStatusDto,
};
use crate::modules::health::HealthStatus;
use crate::modules::lecturers::model::{CreateLecturerDto, Lecturer, UpdateLecturerDto};
use crate::modules::programs::model::{CreateProgramDto, Program, UpdateProgramDto};
use crate::modules::users::model::{CreateUserDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::get_me,
        crate::modules::lecturers::controller::get_lecturers,
        crate::modules::lecturers::controller::get_lecturer,
        crate::modules::lecturers::controller::create_lecturer,
        crate::modules::lecturers::controller::update_lecturer,
        crate::modules::lecturers::controller::delete_lecturer,
        crate::modules::programs::controller::get_programs,
        crate::modules::programs::controller::get_program,
        crate::modules::programs::controller::create_program,
        crate::modules::programs::controller::update_program,
        crate::modules::programs::controller::delete_program,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::enrollments::controller::get_student_enrollments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::update_enrollment_status,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::assessments::controller::get_assessments,
        crate::modules::assessments::controller::get_enrollment_assessments,
        crate::modules::assessments::controller::get_assessment,
        crate::modules::assessments::controller::create_assessment,
        crate::modules::assessments::controller::update_assessment,
        crate::modules::assessments::controller::delete_assessment,
    ),
    components(
        schemas(
            User,
            UserRole,
            CreateUserDto,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            PaginationMeta,
            HealthStatus,
            Lecturer,
            CreateLecturerDto,
            UpdateLecturerDto,
            Program,
            CreateProgramDto,
            UpdateProgramDto,
            Enrollment,
            CreateEnrollmentDto,
            UpdateEnrollmentStatusDto,
            Assessment,
            CreateAssessmentDto,
            UpdateAssessmentDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Lecturers", description = "Lecturer profiles"),
        (name = "Programs", description = "MBKM programs offered by lecturers"),
        (name = "Enrollments", description = "Student enrollments in programs"),
        (name = "Assessments", description = "Graded components of an enrollment")
    ),
    info(
        title = "MBKM API",
        version = "0.1.0",
        description = "REST API for managing MBKM academic programs, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/auth/login",
            "/api/v1/lecturers/{id}",
            "/api/v1/programs",
            "/api/v1/enrollments/{id}/status",
            "/api/v1/assessments/enrollment/{enrollment_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
