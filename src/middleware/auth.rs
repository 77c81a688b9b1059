use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use mbkm_auth::{Claims, validate_token};
use mbkm_config::JwtConfig;
use mbkm_core::{AppError, UserRole};

/// The authenticated caller. Inserted into request extensions by
/// [`authenticate`] and extracted by handlers that need the caller's identity.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn is_student(&self) -> bool {
        self.0.role == UserRole::Student
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// The scheme is matched case-sensitively with exactly one space, and the
/// token must be non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header format"))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() && !token.starts_with(' ') => Ok(token),
        _ => Err(AppError::unauthorized("Invalid authorization header format")),
    }
}

/// Authentication gate for protected routes.
///
/// ```rust,ignore
/// let protected = Router::new()
///     .nest("/programs", programs_router())
///     .route_layer(middleware::from_fn_with_state(jwt_config, authenticate));
/// ```
pub async fn authenticate(
    State(jwt_config): State<JwtConfig>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?;
    let claims = validate_token(token, &jwt_config.secret)?;

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_ok() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Missing authorization header");
    }

    #[test]
    fn test_rejects_bad_formats() {
        for value in ["bearer abc", "Basic abc", "Bearer", "Bearer ", "Bearer  abc", "abc"] {
            let err = bearer_token(&headers_with(value)).unwrap_err();
            assert_eq!(err.status, StatusCode::UNAUTHORIZED, "value: {value:?}");
            assert_eq!(
                err.error.to_string(),
                "Invalid authorization header format"
            );
        }
    }

    #[test]
    fn test_auth_user_accessors() {
        let user_id = Uuid::new_v4();
        let user = AuthUser(Claims {
            sub: user_id,
            email: "mhs@kampus.ac.id".to_string(),
            role: UserRole::Student,
            iat: 0,
            exp: 9999999999,
        });
        assert_eq!(user.user_id(), user_id);
        assert!(user.is_student());
    }
}
