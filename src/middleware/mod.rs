//! Request gates for protected routes.
//!
//! - [`auth`]: validates the bearer token and stores the caller as [`auth::AuthUser`]
//! - [`role`]: checks the caller's role against a per-route allow-list
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `authenticate` validates the token (401 on failure)
//! 3. `require_roles` compares the role with the route's allow-list (403 on failure)
//! 4. The handler runs, optionally extracting `AuthUser` for ownership checks

pub mod auth;
pub mod role;
