use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_helpers::JwtAuth;
use observability::{AuthOperation, ShopMetrics};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::LoginPolicy;
use crate::error::{UserError, UserResult};
use crate::models::{
    normalize_email, AuthResponse, LoginRequest, RegisterRequest, Role, User, UserProfile,
    UserSummary,
};
use crate::repository::UserRepository;

/// Result of [`UserService::ensure_admin`]
#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    Created(UserProfile),
    AlreadyExists(UserProfile),
}

/// Service layer for registration, login and the user directory
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
    login_policy: LoginPolicy,
}

impl<R: UserRepository> UserService<R> {
    /// Uses the default (admin-only) login policy
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
            login_policy: LoginPolicy::default(),
        }
    }

    pub fn with_login_policy(mut self, policy: LoginPolicy) -> Self {
        self.login_policy = policy;
        self
    }

    pub fn jwt(&self) -> &JwtAuth {
        &self.jwt
    }

    /// Register a new `user`-role account and issue a token.
    ///
    /// Field validation happens at the handler boundary.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&input.email);

        if self.repository.get_by_email(&email).await?.is_some() {
            ShopMetrics::record_auth_attempt(AuthOperation::Register, "duplicate");
            return Err(UserError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.name.trim().to_string(), email, password_hash, Role::User);

        let created = match self.repository.create(user).await {
            Ok(user) => user,
            Err(e) => {
                if matches!(e, UserError::DuplicateEmail(_)) {
                    ShopMetrics::record_auth_attempt(AuthOperation::Register, "duplicate");
                }
                return Err(e);
            }
        };

        ShopMetrics::record_auth_attempt(AuthOperation::Register, "success");
        tracing::info!(user_id = %created.id, "User registered");
        self.issue(&created)
    }

    /// Verify credentials, apply the login policy and issue a token
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        let email = normalize_email(&input.email);

        let Some(user) = self.repository.get_by_email(&email).await? else {
            ShopMetrics::record_auth_attempt(AuthOperation::Login, "invalid_credentials");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(&input.password, &user.password_hash)? {
            ShopMetrics::record_auth_attempt(AuthOperation::Login, "invalid_credentials");
            return Err(UserError::InvalidCredentials);
        }

        if !self.login_policy.permits(user.role) {
            ShopMetrics::record_auth_attempt(AuthOperation::Login, "forbidden");
            tracing::info!(user_id = %user.id, role = %user.role, "Login refused by policy");
            return Err(UserError::LoginForbidden(user.role.to_string()));
        }

        ShopMetrics::record_auth_attempt(AuthOperation::Login, "success");
        self.issue(&user)
    }

    /// All users, newest first, without password hashes
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserProfile>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserProfile> {
        self.repository
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(UserError::NotFound(id))
    }

    /// Create an administrator unless the email is already registered.
    ///
    /// An existing account is left untouched, whatever its role.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> UserResult<SeedOutcome> {
        let email = normalize_email(email);

        if let Some(existing) = self.repository.get_by_email(&email).await? {
            return Ok(SeedOutcome::AlreadyExists(existing.into()));
        }

        let user = User::new(
            name.trim().to_string(),
            email,
            hash_password(password)?,
            Role::Admin,
        );
        let created = self.repository.create(user).await?;

        tracing::info!(user_id = %created.id, "Administrator created");
        Ok(SeedOutcome::Created(created.into()))
    }

    fn issue(&self, user: &User) -> UserResult<AuthResponse> {
        let token = self.jwt.create_token(user.id, user.role.as_str())?;
        Ok(AuthResponse {
            token,
            user: UserSummary::from(user),
        })
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
