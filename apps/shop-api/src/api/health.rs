//! Readiness and metrics endpoints
//!
//! Liveness (`/health`) comes from `axum_helpers::health_router`.

use axum::{http::StatusCode, routing::get, Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;
use mongodb::Client;
use observability::metrics_handler;
use serde_json::Value;

use crate::state::AppState;

async fn ready(client: Client) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let database: HealthCheckFuture =
        Box::pin(async move { check_health(&client).await.map_err(|e| e.to_string()) });
    run_health_checks(vec![("database", database)]).await
}

/// `/ready` pings MongoDB; `/metrics` renders Prometheus text
pub fn router(state: &AppState) -> Router {
    let client = state.mongo_client.clone();

    Router::new()
        .route("/ready", get(move || ready(client.clone())))
        .route("/metrics", get(metrics_handler))
}
