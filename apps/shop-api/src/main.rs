//! Shop API - REST server for the storefront

use axum::{middleware, Router};
use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::JwtAuth;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_contact::ContactNotifier;
use email::SmtpProvider;
use observability::{init_metrics, metrics_middleware};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    init_metrics()?;

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    // Connect to MongoDB
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // No SMTP connection is made until the first contact message
    let mailer = SmtpProvider::new(config.smtp.clone())?;
    let contact = ContactNotifier::new(mailer, config.contact.clone())?;

    let state = AppState {
        jwt: JwtAuth::new(&config.jwt),
        config,
        mongo_client,
        db,
        contact,
    };

    api::init_indexes(&state).await?;

    let app = build_app(&state)?;

    info!("Starting Shop API on port {}", state.config.server.port);

    let server_config = state.config.server.clone();
    let mongo_client = state.mongo_client.clone();

    create_production_app(app, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}

/// API under `/api`, docs, `/health`, `/ready` and `/metrics`
fn build_app(state: &AppState) -> std::io::Result<Router> {
    let router =
        axum_helpers::create_router::<openapi::ApiDoc>(api::routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state))
        .layer(middleware::from_fn(metrics_middleware)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::ROLE_USER;
    use http_body_util::BodyExt;
    use mongodb::Client;
    use serde_json::{json, Value};
    use tower::ServiceExt; // For oneshot()
    use uuid::Uuid;

    /// Nothing listens on the discard port, so every MongoDB call fails fast
    const UNREACHABLE_MONGO: &str = "mongodb://127.0.0.1:9/shop?serverSelectionTimeoutMS=200";

    async fn test_state() -> AppState {
        let mongo_client = Client::with_uri_str(UNREACHABLE_MONGO).await.unwrap();

        temp_env::with_vars(config::tests::REQUIRED, || {
            temp_env::with_vars_unset(["CORS_ALLOWED_ORIGIN", "SMTP_HOST"], || {
                let config = Config::from_env().unwrap();
                let mailer = SmtpProvider::new(config.smtp.clone()).unwrap();
                AppState {
                    jwt: JwtAuth::new(&config.jwt),
                    contact: ContactNotifier::new(mailer, config.contact.clone()).unwrap(),
                    db: mongo_client.database("shop"),
                    mongo_client: mongo_client.clone(),
                    config,
                }
            })
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_domain_routes_are_mounted_under_api() {
        let state = test_state().await;
        let app = build_app(&state).unwrap();

        let (status, body) = send(&app, post_json("/api/orders", None, json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], axum_helpers::auth::MSG_NO_TOKEN);

        let token = state.jwt.create_token(Uuid::now_v7(), ROLE_USER).unwrap();
        let empty_order = json!({
            "orderItems": [],
            "shippingAddress": {},
            "paymentMethod": "PayPal",
            "taxPrice": 0.0,
            "shippingPrice": 0.0
        });
        let (status, body) = send(&app, post_json("/api/orders", Some(&token), empty_order)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "No order items");

        let (status, body) = send(
            &app,
            post_json("/api/contact", None, json!({ "firstName": "Ada" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Please fill in all required fields.");

        let (status, _) = send(&app, post_json("/orders", None, json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ready_reports_unreachable_database() {
        let app = build_app(&test_state().await).unwrap();

        let (status, body) = send(&app, get("/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["database"], "disconnected");

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["name"], "shop_api");
    }

    #[tokio::test]
    async fn test_metrics_and_docs_are_served() {
        init_metrics().unwrap();
        let app = build_app(&test_state().await).unwrap();

        let (status, _) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, get("/metrics")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("http_requests_total"));

        let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        let doc: Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["paths"]["/api/orders/{id}"].is_object());
    }
}
