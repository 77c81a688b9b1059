#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::name::en::Name;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use mbkm::modules::users::{CreateUserDto, UserService};
use mbkm::router::init_router;
use mbkm::state::AppState;
use mbkm_auth::create_access_token;
use mbkm_config::{CorsConfig, JwtConfig};
use mbkm_core::UserRole;

pub const TEST_PASSWORD: &str = "rahasia123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        expiry_seconds: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(pool, test_jwt_config(), CorsConfig::default());
    init_router(state, None)
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

fn short_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub fn generate_unique_email() -> String {
    format!("user-{}@kampus.ac.id", Uuid::new_v4())
}

pub fn generate_unique_username() -> String {
    let base: String = Username().fake();
    format!("{}_{}", base.chars().take(30).collect::<String>(), short_suffix())
}

pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    let dto = CreateUserDto {
        username: generate_unique_username(),
        email: generate_unique_email(),
        password: TEST_PASSWORD.to_string(),
        full_name: Some(Name().fake()),
        phone: None,
        role,
    };

    let user = UserService::create_user(pool, dto).await.unwrap();
    let token = create_access_token(user.id, &user.email, user.role, &test_jwt_config()).unwrap();

    TestUser {
        id: user.id,
        email: user.email,
        role: user.role,
        token,
    }
}

/// Inserts a lecturer profile for an existing user and returns its id.
pub async fn create_test_lecturer(pool: &PgPool, user_id: Uuid) -> Uuid {
    sqlx::query_scalar(
        r#"INSERT INTO lecturers (user_id, nidn, full_name, department)
           VALUES ($1, $2, $3, 'Informatika')
           RETURNING id"#,
    )
    .bind(user_id)
    .bind(short_suffix())
    .bind(Name().fake::<String>())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_program(pool: &PgPool, lecturer_id: Uuid, is_active: bool) -> Uuid {
    sqlx::query_scalar(
        r#"INSERT INTO programs (code, name, credits, semester, lecturer_id, is_active)
           VALUES ($1, 'Magang Industri', 20, 5, $2, $3)
           RETURNING id"#,
    )
    .bind(format!("MBKM-{}", short_suffix()))
    .bind(lecturer_id)
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_enrollment(pool: &PgPool, student_id: Uuid, program_id: Uuid) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO enrollments (student_id, program_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(student_id)
    .bind(program_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Lecturer user with a profile and one active program.
pub struct Catalog {
    pub lecturer_user: TestUser,
    pub lecturer_id: Uuid,
    pub program_id: Uuid,
}

pub async fn create_test_catalog(pool: &PgPool) -> Catalog {
    let lecturer_user = create_test_user(pool, UserRole::Lecturer).await;
    let lecturer_id = create_test_lecturer(pool, lecturer_user.id).await;
    let program_id = create_test_program(pool, lecturer_id, true).await;

    Catalog {
        lecturer_user,
        lecturer_id,
        program_id,
    }
}

/// Sends one request and returns the status with the decoded JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
