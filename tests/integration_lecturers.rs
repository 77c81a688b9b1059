mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    TEST_PASSWORD, create_test_lecturer, create_test_program, create_test_user,
    generate_unique_email, generate_unique_username, send, setup_test_app,
};
use mbkm_core::UserRole;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_lecturer(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let lecturer_user = create_test_user(&pool, UserRole::Lecturer).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lecturers",
        Some(&admin.token),
        Some(json!({
            "user_id": lecturer_user.id,
            "nidn": "0012345678",
            "full_name": "Dr. Budi Santoso",
            "department": "Informatika"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_id"], lecturer_user.id.to_string());
    assert_eq!(body["data"]["nidn"], "0012345678");
    assert_eq!(body["data"]["is_active"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lecturer_profile_for_admin_user_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    send(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": generate_unique_username(),
            "email": email,
            "password": TEST_PASSWORD,
            "role": "admin"
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let admin_id = body["data"]["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lecturers",
        Some(&token),
        Some(json!({
            "user_id": admin_id,
            "nidn": "0099999999",
            "full_name": "Admin Kampus"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User is not a lecturer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lecturer_unknown_user(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lecturers",
        Some(&admin.token),
        Some(json!({
            "user_id": uuid::Uuid::new_v4(),
            "nidn": "0011111111",
            "full_name": "Nobody"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_lecturer_profile_conflicts(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let lecturer_user = create_test_user(&pool, UserRole::Lecturer).await;
    create_test_lecturer(&pool, lecturer_user.id).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/lecturers",
        Some(&admin.token),
        Some(json!({
            "user_id": lecturer_user.id,
            "nidn": "0022222222",
            "full_name": "Second Profile"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lecturer_cannot_create_lecturer(pool: PgPool) {
    let lecturer = create_test_user(&pool, UserRole::Lecturer).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/lecturers",
        Some(&lecturer.token),
        Some(json!({
            "user_id": lecturer.id,
            "nidn": "0033333333",
            "full_name": "Self Service"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_lecturers_with_filters(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    for _ in 0..3 {
        let user = create_test_user(&pool, UserRole::Lecturer).await;
        create_test_lecturer(&pool, user.id).await;
    }
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/lecturers?department=Informatika&limit=2",
        Some(&student.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["meta"]["total"], 3);
    assert_eq!(body["data"]["meta"]["limit"], 2);
    assert_eq!(body["data"]["meta"]["has_more"], true);

    let (_, body) = send(
        &app,
        "GET",
        "/api/v1/lecturers?department=Hukum",
        Some(&student.token),
        None,
    )
    .await;
    assert_eq!(body["data"]["meta"]["total"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_lecturer_partially(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let user = create_test_user(&pool, UserRole::Lecturer).await;
    let lecturer_id = create_test_lecturer(&pool, user.id).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/lecturers/{lecturer_id}"),
        Some(&admin.token),
        Some(json!({ "department": "Sistem Informasi", "is_active": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["department"], "Sistem Informasi");
    assert_eq!(body["data"]["is_active"], false);
    assert!(body["data"]["nidn"].as_str().is_some_and(|n| !n.is_empty()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_referenced_lecturer_conflicts(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let user = create_test_user(&pool, UserRole::Lecturer).await;
    let lecturer_id = create_test_lecturer(&pool, user.id).await;
    create_test_program(&pool, lecturer_id, true).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/v1/lecturers/{lecturer_id}"),
        Some(&admin.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "Cannot delete lecturer, it is referenced by one or more programs"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unreferenced_lecturer_then_fetch(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let user = create_test_user(&pool, UserRole::Lecturer).await;
    let lecturer_id = create_test_lecturer(&pool, user.id).await;
    let app = setup_test_app(pool);
    let uri = format!("/api/v1/lecturers/{lecturer_id}");

    let (status, body) = send(&app, "DELETE", &uri, Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Lecturer deleted successfully");
    assert!(body.get("data").is_none());

    let (status, body) = send(&app, "GET", &uri, Some(&admin.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Lecturer not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_lecturer_id(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/lecturers/not-a-uuid",
        Some(&admin.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID format");
}
