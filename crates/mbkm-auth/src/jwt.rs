//! Token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. Expiry is enforced with zero
//! leeway, so a token is rejected the second its `exp` passes.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use thiserror::Error;
use uuid::Uuid;

use mbkm_config::JwtConfig;
use mbkm_core::{AppError, UserRole};

use crate::claims::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    Malformed,
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    SignatureMismatch,
    #[error("Failed to create token: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(_) => AppError::internal(err),
            other => AppError::unauthorized(other.to_string()),
        }
    }
}

/// Issues a signed token for the given identity.
///
/// `exp` is `iat + ttl_seconds`. A negative `ttl_seconds` produces a token
/// that is already expired.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        iat: now as usize,
        exp: (now + ttl_seconds).max(0) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Issues an access token using the configured secret and lifetime.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    issue_token(
        user_id,
        email,
        role,
        &jwt_config.secret,
        jwt_config.expiry_seconds,
    )
}

/// Verifies signature and expiry, then returns the embedded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const SECRET: &str = "test-secret-key-at-least-32-characters-long";

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            expiry_seconds: 3600,
        }
    }

    #[test]
    fn test_create_and_validate() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token =
            create_access_token(user_id, "test@example.com", UserRole::Lecturer, &config).unwrap();
        let claims = validate_token(&token, &config.secret).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Lecturer);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert_eq!(
            validate_token("invalid-token", SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(validate_token("", SECRET), Err(TokenError::Malformed));
    }

    #[test]
    fn test_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), "a@b.com", UserRole::Admin, SECRET, 60).unwrap();
        let result = validate_token(&token, "different-secret-key-at-least-32-characters");
        assert_eq!(result, Err(TokenError::SignatureMismatch));
    }

    #[test]
    fn test_expired_token() {
        let token =
            issue_token(Uuid::new_v4(), "a@b.com", UserRole::Student, SECRET, -120).unwrap();
        assert_eq!(validate_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload() {
        let token = issue_token(Uuid::new_v4(), "a@b.com", UserRole::Student, SECRET, 60).unwrap();
        let admin = issue_token(Uuid::new_v4(), "a@b.com", UserRole::Admin, SECRET, 60).unwrap();

        // Splice the admin payload onto the student signature.
        let parts: Vec<&str> = token.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], admin_parts[1], parts[2]);

        assert_eq!(
            validate_token(&forged, SECRET),
            Err(TokenError::SignatureMismatch)
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let err: AppError = TokenError::Expired.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err: AppError = TokenError::SignatureMismatch.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        let err: AppError = TokenError::Encoding("boom".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
