use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use mbkm::middleware::auth::{AuthUser, authenticate};
use mbkm::middleware::role::{ADMIN_ONLY, ADMIN_OR_LECTURER, RoleSet, require_roles};
use mbkm_auth::create_access_token;
use mbkm_config::JwtConfig;
use mbkm_core::UserRole;

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "role_middleware_test_secret".to_string(),
        expiry_seconds: 600,
    }
}

async fn whoami(user: AuthUser) -> String {
    user.role().to_string()
}

fn gated_app(allowed: RoleSet) -> Router {
    Router::new()
        .route(
            "/gated",
            get(whoami).route_layer(from_fn_with_state(allowed, require_roles)),
        )
        .route_layer(from_fn_with_state(jwt_config(), authenticate))
}

async fn call(app: Router, authorization: Option<String>) -> (StatusCode, String) {
    let mut builder = Request::builder().uri("/gated");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn bearer(role: UserRole) -> Option<String> {
    let token =
        create_access_token(Uuid::new_v4(), "user@kampus.ac.id", role, &jwt_config()).unwrap();
    Some(format!("Bearer {token}"))
}

#[tokio::test]
async fn test_allowed_role_reaches_handler() {
    let (status, body) = call(gated_app(ADMIN_OR_LECTURER), bearer(UserRole::Lecturer)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "lecturer");
}

#[tokio::test]
async fn test_disallowed_role_is_forbidden() {
    for role in [UserRole::Lecturer, UserRole::Student] {
        let (status, body) = call(gated_app(ADMIN_ONLY), bearer(role)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("Access denied"));
    }
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (status, body) = call(gated_app(ADMIN_ONLY), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Missing authorization header"));
}

#[tokio::test]
async fn test_lowercase_scheme_is_rejected() {
    let token = bearer(UserRole::Admin).unwrap().replacen("Bearer", "bearer", 1);
    let (status, body) = call(gated_app(ADMIN_ONLY), Some(token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Invalid authorization header format"));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let other = JwtConfig {
        secret: "someone_elses_secret".to_string(),
        expiry_seconds: 600,
    };
    let token = create_access_token(Uuid::new_v4(), "x@kampus.ac.id", UserRole::Admin, &other)
        .unwrap();

    let (status, _) = call(gated_app(ADMIN_ONLY), Some(format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
