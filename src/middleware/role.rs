//! Role-based authorization.
//!
//! Every protected route carries a static allow-list of roles. The
//! [`require_roles`] middleware runs after [`super::auth::authenticate`] and
//! rejects callers whose role is not on the list.
//!
//! ```rust,ignore
//! Router::new().route(
//!     "/",
//!     get(list_programs).merge(
//!         post(create_program)
//!             .route_layer(middleware::from_fn_with_state(ADMIN_OR_LECTURER, require_roles)),
//!     ),
//! )
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use mbkm_core::{AppError, UserRole};

use crate::middleware::auth::AuthUser;

pub type RoleSet = &'static [UserRole];

pub const ADMIN_ONLY: RoleSet = &[UserRole::Admin];
pub const ADMIN_OR_LECTURER: RoleSet = &[UserRole::Admin, UserRole::Lecturer];
pub const ANY_ROLE: RoleSet = &[UserRole::Admin, UserRole::Lecturer, UserRole::Student];

pub async fn require_roles(
    State(allowed): State<RoleSet>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    authorize(auth_user.role(), allowed)?;

    Ok(next.run(req).await)
}

/// Checks a role against an allow-list, for use inside handlers as well as
/// in [`require_roles`].
pub fn authorize(role: UserRole, allowed: &[UserRole]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        tracing::debug!(role = %role, ?allowed, "Role not permitted for route");
        Err(AppError::forbidden("Access denied"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_admin_passes_every_list() {
        for list in [ADMIN_ONLY, ADMIN_OR_LECTURER, ANY_ROLE] {
            assert!(authorize(UserRole::Admin, list).is_ok());
        }
    }

    #[test]
    fn test_lecturer_blocked_from_admin_only() {
        let err = authorize(UserRole::Lecturer, ADMIN_ONLY).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.error.to_string(), "Access denied");
        assert!(authorize(UserRole::Lecturer, ADMIN_OR_LECTURER).is_ok());
    }

    #[test]
    fn test_student_only_passes_any_role() {
        assert!(authorize(UserRole::Student, ADMIN_ONLY).is_err());
        assert!(authorize(UserRole::Student, ADMIN_OR_LECTURER).is_err());
        assert!(authorize(UserRole::Student, ANY_ROLE).is_ok());
    }
}
