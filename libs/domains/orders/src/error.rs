use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

pub const MSG_ORDER_NOT_FOUND: &str = "Order not found";
pub const MSG_NO_ITEMS: &str = "No order items";
pub const MSG_NOT_OWNER: &str = "Not authorized to access this order";

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Order has no items")]
    NoItems,

    #[error("User {user} may not access order {order}")]
    Forbidden { order: Uuid, user: Uuid },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => AppError::NotFound(MSG_ORDER_NOT_FOUND.to_string()),
            OrderError::NoItems => AppError::BadRequest(MSG_NO_ITEMS.to_string()),
            OrderError::Forbidden { .. } => AppError::Forbidden(MSG_NOT_OWNER.to_string()),
            OrderError::Validation(e) => AppError::ValidationError(e),
            OrderError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}
