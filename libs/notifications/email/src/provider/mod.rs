//! Email provider implementations

pub mod mock;
pub mod smtp;

pub use mock::MockEmailProvider;
pub use smtp::{SmtpConfig, SmtpProvider, SmtpSecurity};

use crate::error::EmailResult;
use crate::models::Email;
use async_trait::async_trait;

/// Result of sending an email
#[derive(Debug)]
pub struct SendResult {
    /// Provider-specific message ID
    pub message_id: String,
}

/// Trait for email providers
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send an email. A single attempt; callers decide whether to retry.
    async fn send(&self, email: &Email) -> EmailResult<SendResult>;

    /// Check if the provider is healthy
    async fn health_check(&self) -> EmailResult<()>;

    /// Get provider name
    fn name(&self) -> &'static str;
}
