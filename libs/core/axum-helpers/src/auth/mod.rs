//! Authentication and authorization module.
//!
//! Tokens are stateless HS256 JWTs carrying the user id and role. Nothing is
//! stored server-side; a token stays valid until it expires.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/api/orders", get(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, ROLE_ADMIN, ROLE_USER, TOKEN_TTL};
pub use middleware::{MSG_NO_TOKEN, MSG_TOKEN_FAILED, jwt_auth_middleware};
