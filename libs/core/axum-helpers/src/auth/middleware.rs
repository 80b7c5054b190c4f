use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const MSG_NO_TOKEN: &str = "Not authorized, no token";
pub const MSG_TOKEN_FAILED: &str = "Not authorized, token failed";

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Verifies the bearer token and inserts [`JwtClaims`](super::JwtClaims) into
/// request extensions, where [`AuthUser`](crate::AuthUser) and
/// [`AdminUser`](crate::AdminUser) pick them up.
///
/// # Example
///
/// ```ignore
/// let admin_routes = Router::new()
///     .route("/", get(list_users))
///     .route_layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return AppError::Unauthorized(MSG_NO_TOKEN.to_string()).into_response();
    };

    let claims = match auth.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return AppError::Unauthorized(MSG_TOKEN_FAILED.to_string()).into_response();
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}
