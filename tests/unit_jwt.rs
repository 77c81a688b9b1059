use mbkm_auth::{TokenError, create_access_token, issue_token, validate_token};
use mbkm_config::JwtConfig;
use mbkm_core::UserRole;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        expiry_seconds: 3600,
    }
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for role in UserRole::ALL {
        let token = create_access_token(user_id, "user@kampus.ac.id", role, &jwt_config).unwrap();
        let claims = validate_token(&token, &jwt_config.secret).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, role);
        assert_eq!(claims.email, "user@kampus.ac.id");
    }
}

#[test]
fn test_expiry_follows_config() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "dosen@kampus.ac.id", UserRole::Lecturer, &jwt_config)
            .unwrap();

    let claims = validate_token(&token, &jwt_config.secret).unwrap();
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_validate_token_invalid() {
    let result = validate_token("invalid.token.here", &get_test_jwt_config().secret);
    assert_eq!(result.unwrap_err(), TokenError::Malformed);
}

#[test]
fn test_validate_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "mhs@kampus.ac.id", UserRole::Student, &jwt_config)
            .unwrap();

    let result = validate_token(&token, "a_different_secret");
    assert_eq!(result.unwrap_err(), TokenError::SignatureMismatch);
}

#[test]
fn test_expired_token_rejected_even_with_valid_signature() {
    let secret = get_test_jwt_config().secret;
    let token = issue_token(
        Uuid::new_v4(),
        "mhs@kampus.ac.id",
        UserRole::Student,
        &secret,
        -10,
    )
    .unwrap();

    assert_eq!(validate_token(&token, &secret).unwrap_err(), TokenError::Expired);
}
