use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MSG_SENT: &str = "Your message has been sent successfully!";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Contact form submission
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub subject: String,
    #[validate(custom(function = "not_blank"))]
    pub message: String,
}

/// Body of every contact response, success or failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: MSG_SENT.to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Values handed to the email templates
#[derive(Debug, Serialize)]
pub(crate) struct ContactEmailData<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

impl<'a> From<&'a ContactRequest> for ContactEmailData<'a> {
    fn from(request: &'a ContactRequest) -> Self {
        let phone = request
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("N/A");

        Self {
            first_name: request.first_name.trim(),
            last_name: request.last_name.trim(),
            email: request.email.trim(),
            phone,
            subject: request.subject.trim(),
            message: request.message.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_subject_fails_validation() {
        let request: ContactRequest = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "message": "Hello"
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_phone_is_optional() {
        let request: ContactRequest = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "subject": "Order",
            "message": "Hello"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(ContactEmailData::from(&request).phone, "N/A");
    }

    #[test]
    fn test_blank_phone_shows_placeholder() {
        let request = ContactRequest {
            phone: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(ContactEmailData::from(&request).phone, "N/A");
    }
}
