//! API routes module

pub mod contact;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes; mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .nest("/products", products::router(state))
        .nest("/orders", orders::router(state))
        .nest("/contact", contact::router(state))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await?;
    products::init_indexes(state).await?;
    orders::init_indexes(state).await
}
