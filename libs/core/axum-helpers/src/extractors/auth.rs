//! Identity extractors backed by [`jwt_auth_middleware`](crate::jwt_auth_middleware).

use crate::auth::{JwtClaims, MSG_NO_TOKEN};
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

pub const MSG_ADMINS_ONLY: &str = "Access denied. Admins only.";

/// Any authenticated caller.
///
/// Rejects with 401 when the route is not behind the JWT middleware or the
/// middleware did not accept a token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub JwtClaims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized(MSG_NO_TOKEN.to_string()))
    }
}

/// Authenticated caller holding the `admin` role; 403 otherwise.
#[derive(Debug, Clone)]
pub struct AdminUser(pub JwtClaims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if !claims.is_admin() {
            tracing::info!(user_id = %claims.sub, role = %claims.role, "Admin route denied");
            return Err(AppError::Forbidden(MSG_ADMINS_ONLY.to_string()));
        }
        Ok(AdminUser(claims))
    }
}
