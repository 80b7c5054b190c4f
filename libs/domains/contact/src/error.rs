use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use email::EmailError;
use thiserror::Error;

use crate::models::ContactResponse;

pub const MSG_MISSING_FIELDS: &str = "Please fill in all required fields.";
pub const MSG_AUTH_FAILED: &str =
    "Authentication failed. Please check your email credentials (EMAIL_USER and EMAIL_PASS) in the .env file.";
pub const MSG_ENVELOPE_REJECTED: &str =
    "Failed to send email. Please check the recipient email address or your email service configuration.";
pub const MSG_SEND_FAILED: &str =
    "There was an error sending your message. Please try again later.";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Required contact fields are missing")]
    MissingFields,

    #[error("Contact email not delivered: {0}")]
    Delivery(#[from] EmailError),
}

pub type ContactResult<T> = Result<T, ContactError>;

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::MissingFields => StatusCode::BAD_REQUEST,
            ContactError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the person who filled in the form
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::MissingFields => MSG_MISSING_FIELDS,
            ContactError::Delivery(EmailError::Authentication(_)) => MSG_AUTH_FAILED,
            ContactError::Delivery(EmailError::Envelope(_)) => MSG_ENVELOPE_REJECTED,
            ContactError::Delivery(_) => MSG_SEND_FAILED,
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        if let ContactError::Delivery(ref err) = self {
            tracing::error!(class = err.class(), "Contact email failed: {}", err);
        }
        let body = ContactResponse::failed(self.user_message());
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_class_has_its_message() {
        let cases = [
            (EmailError::Authentication("535".into()), MSG_AUTH_FAILED),
            (EmailError::Envelope("550".into()), MSG_ENVELOPE_REJECTED),
            (EmailError::Transport("timeout".into()), MSG_SEND_FAILED),
            (EmailError::Template("bad".into()), MSG_SEND_FAILED),
            (EmailError::Config("bad".into()), MSG_SEND_FAILED),
        ];

        for (error, expected) in cases {
            let err = ContactError::from(error);
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.user_message(), expected);
        }
    }

    #[test]
    fn test_missing_fields_is_bad_request() {
        let err = ContactError::MissingFields;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), MSG_MISSING_FIELDS);
    }
}
