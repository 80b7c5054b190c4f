//! Users Domain
//!
//! Registration, login and the admin-only user directory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /auth/register, /auth/login, /users
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Argon2 hashing, token issuing, login policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and MongoDB implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let jwt = JwtAuth::new(&JwtConfig::new("a-development-secret-of-32-chars!!")?);
//! let service = UserService::new(InMemoryUserRepository::new(), jwt);
//!
//! // Routes are relative; the gateway nests them under /api
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use config::LoginPolicy;
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    AuthResponse, LoginRequest, RegisterRequest, Role, User, UserProfile, UserSummary,
};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{SeedOutcome, UserService};
