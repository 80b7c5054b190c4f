//! Configuration for the Shop API

use axum_helpers::JwtConfig;
use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_contact::ContactConfig;
use domain_users::LoginPolicy;
use email::SmtpConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub login_policy: LoginPolicy,
    pub smtp: SmtpConfig,
    pub contact: ContactConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            login_policy: LoginPolicy::from_env()?,
            smtp: SmtpConfig::from_env()?,
            contact: ContactConfig::from_env()?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const REQUIRED: [(&str, Option<&str>); 5] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017/shop")),
        ("JWT_SECRET", Some("config-test-secret-with-at-least-32-chars")),
        ("SMTP_USERNAME", Some("shop@example.com")),
        ("SMTP_PASSWORD", Some("app-password")),
        ("CONTACT_RECIPIENT_EMAIL", Some("owner@example.com")),
    ];

    #[test]
    fn test_loads_with_defaults() {
        temp_env::with_vars(REQUIRED, || {
            let unset = [
                "PORT",
                "MONGODB_DATABASE",
                "MONGO_DATABASE",
                "AUTH_LOGIN_REQUIRED_ROLE",
                "SMTP_HOST",
            ];
            temp_env::with_vars_unset(unset, || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "shop_api");
                assert_eq!(config.server.port, 5000);
                assert_eq!(config.mongodb.database(), "shop");
                assert_eq!(config.smtp.host, "smtp.gmail.com");
                assert_eq!(config.contact.recipient, "owner@example.com");
                assert_eq!(config.login_policy, LoginPolicy::default());
            });
        });
    }

    #[test]
    fn test_short_jwt_secret_is_rejected() {
        temp_env::with_vars(REQUIRED, || {
            temp_env::with_var("JWT_SECRET", Some("too-short"), || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            });
        });
    }
}
