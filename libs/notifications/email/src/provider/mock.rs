//! Mock email provider for testing

use super::{EmailProvider, SendResult};
use crate::error::{EmailError, EmailResult};
use crate::models::Email;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock email provider that captures sent emails
#[derive(Clone, Default)]
pub struct MockEmailProvider {
    sent_emails: Arc<Mutex<Vec<Email>>>,
    failure: Option<EmailError>,
}

impl MockEmailProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider whose every send fails with `error`
    pub fn failing(error: EmailError) -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            failure: Some(error),
        }
    }

    /// Get all sent emails
    pub async fn sent_emails(&self) -> Vec<Email> {
        self.sent_emails.lock().await.clone()
    }

    /// Get the count of sent emails
    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }

    /// Check if an email was sent to a specific address
    pub async fn was_sent_to(&self, email: &str) -> bool {
        self.sent_emails
            .lock()
            .await
            .iter()
            .any(|e| e.to == email)
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: &Email) -> EmailResult<SendResult> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        self.sent_emails.lock().await.push(email.clone());

        Ok(SendResult {
            message_id: format!("mock-{}", email.id),
        })
    }

    async fn health_check(&self) -> EmailResult<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_sends_email() {
        let provider = MockEmailProvider::new();

        let email = Email::new("test@example.com", "Test Subject").with_text("Test body");

        let result = provider.send(&email).await.unwrap();
        assert_eq!(result.message_id, format!("mock-{}", email.id));

        let sent = provider.sent_emails().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "test@example.com");
    }

    #[tokio::test]
    async fn test_mock_provider_fails_with_given_class() {
        let provider = MockEmailProvider::failing(EmailError::Authentication("535".into()));

        let email = Email::new("test@example.com", "Test Subject").with_text("Test body");

        let err = provider.send(&email).await.unwrap_err();
        assert_eq!(err.class(), "authentication");
        assert_eq!(provider.sent_count().await, 0);
        assert!(provider.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_clones_share_outbox() {
        let provider = MockEmailProvider::new();
        let handle = provider.clone();

        let email = Email::new("user@example.com", "Test").with_text("Body");
        provider.send(&email).await.unwrap();

        assert!(handle.was_sent_to("user@example.com").await);
        assert!(!handle.was_sent_to("other@example.com").await);
    }
}
