use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::middleware::role::{ADMIN_ONLY, ADMIN_OR_LECTURER, ANY_ROLE, require_roles};
use crate::state::AppState;

use super::controller::{
    create_enrollment, delete_enrollment, get_enrollment, get_enrollments,
    get_student_enrollments, update_enrollment_status,
};

/// Students reach the per-id and per-student reads and enrollment creation;
/// ownership is checked in the handlers.
pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_enrollments)
                .route_layer(from_fn_with_state(ADMIN_OR_LECTURER, require_roles))
                .merge(
                    post(create_enrollment).route_layer(from_fn_with_state(ANY_ROLE, require_roles)),
                ),
        )
        .route("/student/{student_id}", get(get_student_enrollments))
        .route(
            "/{id}",
            get(get_enrollment).merge(
                delete(delete_enrollment).route_layer(from_fn_with_state(ADMIN_ONLY, require_roles)),
            ),
        )
        .route(
            "/{id}/status",
            put(update_enrollment_status)
                .route_layer(from_fn_with_state(ADMIN_OR_LECTURER, require_roles)),
        )
}
