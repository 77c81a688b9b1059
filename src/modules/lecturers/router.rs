use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::middleware::role::{ADMIN_ONLY, require_roles};
use crate::state::AppState;

use super::controller::{
    create_lecturer, delete_lecturer, get_lecturer, get_lecturers, update_lecturer,
};

/// Reads are open to any authenticated caller; writes are admin only.
pub fn init_lecturers_router() -> Router<AppState> {
    let admin_only = || middleware::from_fn_with_state(ADMIN_ONLY, require_roles);

    Router::new()
        .route(
            "/",
            get(get_lecturers).merge(post(create_lecturer).route_layer(admin_only())),
        )
        .route(
            "/{id}",
            get(get_lecturer)
                .merge(put(update_lecturer).route_layer(admin_only()))
                .merge(delete(delete_lecturer).route_layer(admin_only())),
        )
}
