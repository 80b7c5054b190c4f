//! Contact form route

use axum::Router;
use domain_contact::handlers;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(state.contact.clone())
}
