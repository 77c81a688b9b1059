use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};

use crate::middleware::role::{ADMIN_OR_LECTURER, require_roles};
use crate::state::AppState;

use super::controller::{
    create_assessment, delete_assessment, get_assessment, get_assessments,
    get_enrollment_assessments, update_assessment,
};

/// Writes are staff-only. Students can read assessments of their own
/// enrollments through the per-id and per-enrollment routes.
pub fn init_assessments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_assessments)
                .post(create_assessment)
                .route_layer(from_fn_with_state(ADMIN_OR_LECTURER, require_roles)),
        )
        .route(
            "/enrollment/{enrollment_id}",
            get(get_enrollment_assessments),
        )
        .route(
            "/{id}",
            get(get_assessment).merge(
                put(update_assessment)
                    .delete(delete_assessment)
                    .route_layer(from_fn_with_state(ADMIN_OR_LECTURER, require_roles)),
            ),
        )
}
