//! Contact Domain
//!
//! Turns contact form submissions into an email for the shop owner.
//! Delivery failures are reported with a message matched to their cause
//! (credentials, rejected envelope, or anything else).

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod templates;

pub use config::ContactConfig;
pub use error::{ContactError, ContactResult};
pub use handlers::ApiDoc;
pub use models::{ContactRequest, ContactResponse};
pub use service::ContactNotifier;
