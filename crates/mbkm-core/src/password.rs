//! Password hashing with bcrypt.

use axum::http::StatusCode;
use bcrypt::{hash, verify};
use thiserror::Error;

use crate::errors::AppError;

/// bcrypt work factor. Roughly 100 ms per hash on commodity hardware.
pub const HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("password does not match")]
    Mismatch,
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    Ok(hash(password, HASH_COST)?)
}

/// Checks `password` against a stored bcrypt digest.
///
/// Returns [`PasswordError::Mismatch`] for a wrong password and
/// [`PasswordError::Hash`] when the digest itself cannot be parsed.
pub fn verify_password(password: &str, digest: &str) -> Result<(), PasswordError> {
    if verify(password, digest)? {
        Ok(())
    } else {
        Err(PasswordError::Mismatch)
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AppError::new(
                StatusCode::UNAUTHORIZED,
                anyhow::anyhow!("Invalid email or password"),
            ),
            PasswordError::Hash(e) => AppError::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("correct horse battery").unwrap();
        assert_ne!(digest, "correct horse battery");
        assert!(verify_password("correct horse battery", &digest).is_ok());
    }

    #[test]
    fn test_wrong_password_is_mismatch() {
        let digest = hash_password("correct horse battery").unwrap();
        let result = verify_password("wrong password", &digest);
        assert!(matches!(result, Err(PasswordError::Mismatch)));
    }

    #[test]
    fn test_same_password_hashes_differ() {
        let first = hash_password("samepassword").unwrap();
        let second = hash_password("samepassword").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_hash_uses_configured_cost() {
        let digest = hash_password("password123").unwrap();
        assert!(digest.starts_with("$2b$10$"));
    }

    #[test]
    fn test_garbage_digest_is_hash_error() {
        let result = verify_password("password123", "not-a-bcrypt-digest");
        assert!(matches!(result, Err(PasswordError::Hash(_))));
    }

    #[test]
    fn test_error_status_mapping() {
        let err: AppError = PasswordError::Mismatch.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid email or password");

        let hash_err = verify_password("x", "garbage").unwrap_err();
        let err: AppError = hash_err.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
