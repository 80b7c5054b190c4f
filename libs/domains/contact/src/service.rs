//! Contact notifier: renders a submission and hands it to the mail provider

use email::{Email, EmailProvider, TemplateEngine};
use observability::ShopMetrics;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::config::ContactConfig;
use crate::error::{ContactError, ContactResult};
use crate::models::{ContactEmailData, ContactRequest};
use crate::templates::{contact_template, CONTACT_TEMPLATE};

pub struct ContactNotifier<P: EmailProvider> {
    provider: Arc<P>,
    templates: Arc<TemplateEngine>,
    recipient: String,
}

impl<P: EmailProvider> ContactNotifier<P> {
    pub fn new(provider: P, config: ContactConfig) -> ContactResult<Self> {
        let mut templates = TemplateEngine::new();
        templates.register(contact_template())?;

        Ok(Self {
            provider: Arc::new(provider),
            templates: Arc::new(templates),
            recipient: config.recipient,
        })
    }

    /// Build the notification email for a submission. Replies go to the submitter.
    pub fn compose(&self, request: &ContactRequest) -> ContactResult<Email> {
        let data = ContactEmailData::from(request);
        let rendered = self.templates.render(CONTACT_TEMPLATE, &data)?;

        let mut email = Email::new(&self.recipient, rendered.subject).with_reply_to(data.email);
        if let Some(text) = rendered.body_text {
            email = email.with_text(text);
        }
        if let Some(html) = rendered.body_html {
            email = email.with_html(html);
        }
        Ok(email)
    }

    /// Validate and deliver a submission. One attempt, no retries.
    #[instrument(skip(self, request), fields(subject = %request.subject))]
    pub async fn send(&self, request: ContactRequest) -> ContactResult<()> {
        if request.validate().is_err() {
            ShopMetrics::record_contact_message("missing_fields");
            return Err(ContactError::MissingFields);
        }

        let email = self.compose(&request)?;
        match self.provider.send(&email).await {
            Ok(result) => {
                tracing::info!(message_id = %result.message_id, "Contact message delivered");
                ShopMetrics::record_contact_message("sent");
                Ok(())
            }
            Err(err) => {
                ShopMetrics::record_contact_message(err.class());
                Err(err.into())
            }
        }
    }
}

impl<P: EmailProvider> Clone for ContactNotifier<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            templates: Arc::clone(&self.templates),
            recipient: self.recipient.clone(),
        }
    }
}
