//! # MBKM Auth
//!
//! Signed, time-limited access tokens for the MBKM API.
//!
//! - [`claims`]: the claim bundle embedded in every token
//! - [`jwt`]: token issuance and validation (HS256)
//!
//! Validation is pure and stateless: a token is accepted if its signature
//! matches the configured secret and it has not expired. There is no
//! revocation list, so a token stays valid until `exp`.
//!
//! # Example
//!
//! ```ignore
//! use mbkm_auth::{create_access_token, validate_token};
//! use mbkm_config::JwtConfig;
//! use mbkm_core::UserRole;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, "dosen@kampus.ac.id", UserRole::Lecturer, &config)?;
//! let claims = validate_token(&token, &config.secret)?;
//! assert_eq!(claims.role, UserRole::Lecturer);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, create_access_token, issue_token, validate_token};
