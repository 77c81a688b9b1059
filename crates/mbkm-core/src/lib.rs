//! # MBKM Core
//!
//! Core types, errors, and utilities for the MBKM API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{success, message, code, data}` response envelope
//! - [`pagination`]: Pagination utilities for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//! - [`role`]: The closed set of user roles
//!
//! # Example
//!
//! ```ignore
//! use mbkm_core::{ApiResponse, AppError, UserRole};
//! use mbkm_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Program not found"));
//! let digest = hash_password("secure_password")?;
//! verify_password("secure_password", &digest)?;
//! let body = ApiResponse::ok("Program retrieved successfully", program);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;
pub mod role;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use password::{PasswordError, hash_password, verify_password};
pub use response::{ApiResponse, MessageResponse};
pub use role::UserRole;
