//! Outbound email for the shop services
//!
//! ## Components
//!
//! - **Email Model**: `Email` with text/HTML bodies and reply-to
//! - **Providers**: `SmtpProvider` (lettre) and `MockEmailProvider` behind the `EmailProvider` trait
//! - **Templates**: Handlebars-based `TemplateEngine`
//! - **Errors**: `EmailError`, which sorts SMTP failures into authentication,
//!   envelope and transport classes
//!
//! ## Usage
//!
//! ```ignore
//! use core_config::FromEnv;
//! use email::{Email, EmailProvider, SmtpConfig, SmtpProvider};
//!
//! let provider = SmtpProvider::new(SmtpConfig::from_env()?)?;
//! let email = Email::new("owner@example.com", "Hello").with_text("Body");
//! provider.send(&email).await?;
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod templates;

pub use error::{EmailError, EmailResult};
pub use models::Email;
pub use provider::{
    EmailProvider, MockEmailProvider, SendResult, SmtpConfig, SmtpProvider, SmtpSecurity,
};
pub use templates::{EmailTemplate, RenderedTemplate, TemplateEngine};
