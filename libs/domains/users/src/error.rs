use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

pub const MSG_USER_EXISTS: &str = "User already exists";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_NOT_ADMIN: &str = "Access Denied: You do not have administrator privileges.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login not permitted for role '{0}'")]
    LoginForbidden(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            UserError::DuplicateEmail(_) => AppError::BadRequest(MSG_USER_EXISTS.to_string()),
            UserError::InvalidCredentials => {
                AppError::BadRequest(MSG_INVALID_CREDENTIALS.to_string())
            }
            UserError::LoginForbidden(_) => AppError::Forbidden(MSG_NOT_ADMIN.to_string()),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Token(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for UserError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        UserError::Token(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                UserError::DuplicateEmail("a@b.c".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (UserError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (
                UserError::LoginForbidden("user".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                UserError::Database("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status_code(), expected);
        }
    }
}
