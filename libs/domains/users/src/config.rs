use core_config::{env_or_default, ConfigError, FromEnv};

use crate::models::Role;

/// Who may obtain a token through `/auth/login`.
///
/// Registration always succeeds for valid input; this only gates login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPolicy {
    /// Every user with valid credentials
    Open,
    /// Only users holding the given role
    RequireRole(Role),
}

impl LoginPolicy {
    pub fn permits(&self, role: Role) -> bool {
        match self {
            LoginPolicy::Open => true,
            LoginPolicy::RequireRole(required) => *required == role,
        }
    }
}

impl Default for LoginPolicy {
    fn default() -> Self {
        LoginPolicy::RequireRole(Role::Admin)
    }
}

impl FromEnv for LoginPolicy {
    /// AUTH_LOGIN_REQUIRED_ROLE: `admin` (default), `user`, or `none`
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("AUTH_LOGIN_REQUIRED_ROLE", Role::Admin.as_str());
        if raw.trim().eq_ignore_ascii_case("none") {
            return Ok(LoginPolicy::Open);
        }
        raw.trim()
            .parse::<Role>()
            .map(LoginPolicy::RequireRole)
            .map_err(|e| ConfigError::ParseError {
                key: "AUTH_LOGIN_REQUIRED_ROLE".to_string(),
                details: e.to_string(),
            })
    }
}
