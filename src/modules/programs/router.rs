use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::middleware::role::{ADMIN_ONLY, ADMIN_OR_LECTURER, require_roles};
use crate::state::AppState;

use super::controller::{create_program, delete_program, get_program, get_programs, update_program};

pub fn init_programs_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_programs).merge(
                post(create_program)
                    .route_layer(from_fn_with_state(ADMIN_OR_LECTURER, require_roles)),
            ),
        )
        .route(
            "/{id}",
            get(get_program)
                .merge(
                    put(update_program)
                        .route_layer(from_fn_with_state(ADMIN_OR_LECTURER, require_roles)),
                )
                .merge(delete(delete_program).route_layer(from_fn_with_state(ADMIN_ONLY, require_roles))),
        )
}
