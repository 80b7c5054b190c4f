//! Auth and user directory routes

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};

use crate::state::AppState;

/// `/auth/register`, `/auth/login` and `/users`
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let service = UserService::new(repository, state.jwt.clone())
        .with_login_policy(state.config.login_policy);
    handlers::router(service)
}

/// Unique email index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
