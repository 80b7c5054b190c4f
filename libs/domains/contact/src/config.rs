use core_config::{env_first_of, ConfigError, FromEnv};

/// Where contact form submissions are delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub recipient: String,
}

impl ContactConfig {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

impl FromEnv for ContactConfig {
    /// CONTACT_RECIPIENT_EMAIL, or the legacy RECIPIENT_EMAIL
    fn from_env() -> Result<Self, ConfigError> {
        let recipient = env_first_of(&["CONTACT_RECIPIENT_EMAIL", "RECIPIENT_EMAIL"])?;
        Ok(Self::new(recipient.trim()))
    }
}
