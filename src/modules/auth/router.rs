use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

use super::controller::{get_me, login, register};

/// `/register` and `/login` are public; `/me` requires a valid token.
pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/me",
            get(get_me).route_layer(middleware::from_fn_with_state(
                state.jwt_config.clone(),
                authenticate,
            )),
        )
}
