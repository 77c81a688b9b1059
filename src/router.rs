use anyhow::anyhow;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use mbkm_config::CorsConfig;
use mbkm_core::AppError;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::auth::authenticate;
use crate::modules::assessments::init_assessments_router;
use crate::modules::auth::init_auth_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::health::init_health_router;
use crate::modules::lecturers::init_lecturers_router;
use crate::modules::programs::init_programs_router;
use crate::state::AppState;

/// Builds the full application. `/metrics` is only mounted when a
/// Prometheus handle is supplied.
pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let protected = Router::new()
        .nest("/programs", init_programs_router())
        .nest("/lecturers", init_lecturers_router())
        .nest("/enrollments", init_enrollments_router())
        .nest("/assessments", init_assessments_router())
        .route_layer(middleware::from_fn_with_state(
            state.jwt_config.clone(),
            authenticate,
        ));

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest(
            "/api/v1",
            Router::new()
                .nest("/auth", init_auth_router(&state))
                .merge(protected),
        )
        .fallback(route_not_found)
        .with_state(state.clone());

    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    app.layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

async fn route_not_found() -> AppError {
    AppError::not_found(anyhow!("Route not found"))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Credentials cannot be combined with a wildcard origin.
    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}
