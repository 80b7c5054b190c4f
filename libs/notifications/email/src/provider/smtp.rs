//! SMTP email provider using lettre

use super::{EmailProvider, SendResult};
use crate::error::{EmailError, EmailResult};
use crate::models::Email;
use async_trait::async_trait;
use core_config::{env_first_of, env_flag, env_or_default, ConfigError, FromEnv};
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::str::FromStr;
use std::time::Duration;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// How the connection to the SMTP server is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Implicit TLS from the first byte (port 465)
    Tls,
    /// Plain connection upgraded with STARTTLS (port 587)
    StartTls,
    /// No encryption; local catchers such as Mailpit
    None,
}

impl FromStr for SmtpSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tls" | "ssl" => Ok(SmtpSecurity::Tls),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "none" | "plain" => Ok(SmtpSecurity::None),
            other => Err(format!("expected tls, starttls or none, got '{}'", other)),
        }
    }
}

/// SMTP provider configuration
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    /// Login name, also used as the sender address
    pub username: String,
    pub password: String,
    /// Skip certificate verification (self-signed development relays)
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username)
            .field("password", &"***")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

/// Environment variables:
/// - `SMTP_HOST` (default: smtp.gmail.com)
/// - `SMTP_PORT` (default: 465)
/// - `SMTP_SECURITY` (default: tls)
/// - `SMTP_USERNAME` or `EMAIL_USER` (required)
/// - `SMTP_PASSWORD` or `EMAIL_PASS` (required)
/// - `SMTP_ACCEPT_INVALID_CERTS` (default: false)
impl FromEnv for SmtpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = env_or_default("SMTP_PORT", "465")
            .parse::<u16>()
            .map_err(|e: std::num::ParseIntError| ConfigError::ParseError {
                key: "SMTP_PORT".to_string(),
                details: e.to_string(),
            })?;

        let security = env_or_default("SMTP_SECURITY", "tls")
            .parse::<SmtpSecurity>()
            .map_err(|details| ConfigError::ParseError {
                key: "SMTP_SECURITY".to_string(),
                details,
            })?;

        Ok(Self {
            host: env_or_default("SMTP_HOST", "smtp.gmail.com"),
            port,
            security,
            username: env_first_of(&["SMTP_USERNAME", "EMAIL_USER"])?,
            password: env_first_of(&["SMTP_PASSWORD", "EMAIL_PASS"])?,
            accept_invalid_certs: env_flag("SMTP_ACCEPT_INVALID_CERTS", false)?,
        })
    }
}

/// SMTP email provider
pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpProvider {
    /// Build the transport. No connection is made until the first send.
    pub fn new(config: SmtpConfig) -> EmailResult<Self> {
        let from: Mailbox = config
            .username
            .parse()
            .map_err(|e| EmailError::Config(format!("Invalid sender address: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .timeout(Some(SMTP_TIMEOUT));

        if config.security != SmtpSecurity::None {
            let params = TlsParameters::builder(config.host.clone())
                .dangerous_accept_invalid_certs(config.accept_invalid_certs)
                .build()
                .map_err(|e| EmailError::Config(format!("Invalid TLS parameters: {}", e)))?;

            builder = builder.tls(match config.security {
                SmtpSecurity::StartTls => Tls::Required(params),
                _ => Tls::Wrapper(params),
            });
        }

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            security = ?config.security,
            "SMTP provider configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

fn build_message(from: &Mailbox, email: &Email) -> EmailResult<Message> {
    let to: Mailbox = email.to.parse()?;

    let mut builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(&email.subject);

    if let Some(reply_to) = &email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!(reply_to = %reply_to, "Skipping unparsable reply-to: {}", e),
        }
    }

    let message = match (&email.body_text, &email.body_html) {
        (Some(text), Some(html)) => builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html.clone()),
                ),
        )?,
        (Some(text), None) => builder
            .header(ContentType::TEXT_PLAIN)
            .body(text.clone())?,
        (None, Some(html)) => builder
            .header(ContentType::TEXT_HTML)
            .body(html.clone())?,
        (None, None) => {
            return Err(EmailError::Template(
                "Email must have either text or HTML body".to_string(),
            ));
        }
    };

    Ok(message)
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &Email) -> EmailResult<SendResult> {
        let message = build_message(&self.from, email)?;

        let response = self.transport.send(message).await.map_err(|e| {
            let error = EmailError::from(e);
            tracing::error!(email_id = %email.id, class = error.class(), "SMTP send failed: {}", error);
            error
        })?;

        let message_id = response
            .message()
            .next()
            .map(|s| s.to_string())
            .unwrap_or_else(|| email.id.clone());

        tracing::info!(
            email_id = %email.id,
            to = %email.to,
            subject = %email.subject,
            "Email sent successfully"
        );

        Ok(SendResult { message_id })
    }

    async fn health_check(&self) -> EmailResult<()> {
        match self.transport.test_connection().await? {
            true => Ok(()),
            false => Err(EmailError::Transport(
                "SMTP server did not accept the connection".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
