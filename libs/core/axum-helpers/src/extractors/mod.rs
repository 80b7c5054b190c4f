//! Custom extractors for Axum handlers.

pub mod auth;
pub mod uuid_path;
pub mod validated_json;

pub use auth::{AdminUser, AuthUser};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
