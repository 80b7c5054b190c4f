//! Error types for outbound email.

use thiserror::Error;

pub type EmailResult<T> = Result<T, EmailError>;

/// Delivery failure, classified by cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    /// The SMTP server rejected our credentials
    #[error("SMTP authentication failed: {0}")]
    Authentication(String),

    /// Sender or recipient rejected, or the message could not be addressed
    #[error("Envelope rejected: {0}")]
    Envelope(String),

    /// Connection, TLS, timeout or any other delivery failure
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EmailError {
    /// Short label for logs and metrics
    pub fn class(&self) -> &'static str {
        match self {
            EmailError::Authentication(_) => "authentication",
            EmailError::Envelope(_) => "envelope",
            EmailError::Transport(_) => "transport",
            EmailError::Template(_) => "template",
            EmailError::Config(_) => "config",
        }
    }

    /// Classify an SMTP failure from its reply code and description.
    ///
    /// - 530, 534, 535 or an authentication failure without a reply → `Authentication`
    /// - 550, 551, 553, 554 → `Envelope`
    /// - anything else → `Transport`
    pub fn from_smtp_reply(code: Option<u16>, detail: String) -> Self {
        match code {
            Some(530 | 534 | 535) => EmailError::Authentication(detail),
            Some(550 | 551 | 553 | 554) => EmailError::Envelope(detail),
            Some(_) => EmailError::Transport(detail),
            None if detail.to_ascii_lowercase().contains("authentication") => {
                EmailError::Authentication(detail)
            }
            None => EmailError::Transport(detail),
        }
    }
}

impl From<lettre::transport::smtp::Error> for EmailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        let code = err
            .status()
            .and_then(|code| code.to_string().parse::<u16>().ok());
        EmailError::from_smtp_reply(code, err.to_string())
    }
}

impl From<lettre::address::AddressError> for EmailError {
    fn from(err: lettre::address::AddressError) -> Self {
        EmailError::Envelope(err.to_string())
    }
}

impl From<lettre::error::Error> for EmailError {
    fn from(err: lettre::error::Error) -> Self {
        EmailError::Envelope(err.to_string())
    }
}

impl From<core_config::ConfigError> for EmailError {
    fn from(err: core_config::ConfigError) -> Self {
        EmailError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_codes() {
        for code in [530, 534, 535] {
            let err = EmailError::from_smtp_reply(Some(code), "5.7.8 bad credentials".into());
            assert_eq!(err.class(), "authentication", "code {}", code);
        }
    }

    #[test]
    fn test_envelope_codes() {
        for code in [550, 551, 553, 554] {
            let err = EmailError::from_smtp_reply(Some(code), "mailbox unavailable".into());
            assert_eq!(err.class(), "envelope", "code {}", code);
        }
    }

    #[test]
    fn test_other_codes_are_transport() {
        let err = EmailError::from_smtp_reply(Some(421), "service not available".into());
        assert!(matches!(err, EmailError::Transport(_)));

        let err = EmailError::from_smtp_reply(None, "connection refused".into());
        assert!(matches!(err, EmailError::Transport(_)));
    }

    #[test]
    fn test_auth_failure_without_reply() {
        let err = EmailError::from_smtp_reply(
            None,
            "internal client error: No compatible authentication mechanism was found".into(),
        );
        assert!(matches!(err, EmailError::Authentication(_)));
    }

    #[test]
    fn test_bad_address_is_envelope() {
        let err: EmailError = "not an address"
            .parse::<lettre::Address>()
            .unwrap_err()
            .into();
        assert_eq!(err.class(), "envelope");
    }
}
