//! JWT claim structure for access tokens.

use mbkm_core::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in access tokens.
///
/// Carries enough to authenticate and authorize a request without a
/// database lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: Uuid,
    /// User's email address
    pub email: String,
    /// User's role at the time the token was issued
    pub role: UserRole,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id,
            email: "test@example.com".to_string(),
            role: UserRole::Student,
            iat: 1234567800,
            exp: 1234567890,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(&format!(r#""sub":"{user_id}""#)));
        assert!(serialized.contains(r#""role":"student""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"6f1c2a4e-8f7b-4b59-9a3e-1d2c3b4a5f60","email":"user@test.com","role":"admin","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(
            claims.sub.to_string(),
            "6f1c2a4e-8f7b-4b59-9a3e-1d2c3b4a5f60"
        );
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_claims_reject_unknown_role() {
        let json = r#"{"sub":"6f1c2a4e-8f7b-4b59-9a3e-1d2c3b4a5f60","email":"user@test.com","role":"dean","exp":1,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_reject_non_uuid_subject() {
        let json = r#"{"sub":"42","email":"user@test.com","role":"admin","exp":1,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
