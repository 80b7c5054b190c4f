//! Handler tests for the Users domain
//!
//! Drive the domain router directly with an in-memory repository:
//! - Request validation and error bodies
//! - Token issuing on register/login
//! - Admin-only access to the user directory

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("handler-test-secret-with-at-least-32-chars").unwrap())
}

fn app(repo: InMemoryUserRepository, policy: LoginPolicy) -> Router {
    handlers::router(UserService::new(repo, jwt()).with_login_policy(policy))
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn registration(email: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": email,
        "password": "secret1",
        "confirmPassword": "secret1"
    })
}

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let app = app(InMemoryUserRepository::new(), LoginPolicy::default());

    let response = app
        .oneshot(post_json("/auth/register", registration("Ada@Example.com")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_password_mismatch_creates_nothing() {
    let repo = InMemoryUserRepository::new();
    let app = app(repo.clone(), LoginPolicy::default());

    let mut input = registration("ada@example.com");
    input["confirmPassword"] = json!("different");

    let response = app.oneshot(post_json("/auth/register", input)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body.to_string().contains("Password confirmation does not match password"));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_register_duplicate_email_is_400() {
    let repo = InMemoryUserRepository::new();
    let app = app(repo.clone(), LoginPolicy::default());

    let first = app
        .clone()
        .oneshot(post_json("/auth/register", registration("ada@example.com")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_json("/auth/register", registration("ada@example.com")))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = json_body(second.into_body()).await;
    assert_eq!(body["message"], "User already exists");
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_login_invalid_credentials_is_400() {
    let app = app(InMemoryUserRepository::new(), LoginPolicy::Open);

    app.clone()
        .oneshot(post_json("/auth/register", registration("ada@example.com")))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": "ada@example.com", "password": "not-it" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_non_admin_is_403_under_default_policy() {
    let app = app(InMemoryUserRepository::new(), LoginPolicy::default());

    app.clone()
        .oneshot(post_json("/auth/register", registration("ada@example.com")))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": "ada@example.com", "password": "secret1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "Access Denied: You do not have administrator privileges."
    );
}

#[tokio::test]
async fn test_list_users_requires_token() {
    let app = app(InMemoryUserRepository::new(), LoginPolicy::default());

    let response = app.oneshot(get_with_token("/users", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_forbidden_for_non_admin_without_data() {
    let app = app(InMemoryUserRepository::new(), LoginPolicy::Open);

    let registered = app
        .clone()
        .oneshot(post_json("/auth/register", registration("ada@example.com")))
        .await
        .unwrap();
    let token = json_body(registered.into_body()).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(get_with_token("/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response.into_body()).await;
    assert!(!body.to_string().contains("ada@example.com"));
}

#[tokio::test]
async fn test_admin_lists_users_without_password_hashes() {
    let repo = InMemoryUserRepository::new();
    let service = UserService::new(repo, jwt());
    service
        .ensure_admin("Admin", "admin@example.com", "admin-pass")
        .await
        .unwrap();
    let app = handlers::router(service);

    let login = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": "admin@example.com", "password": "admin-pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let token = json_body(login.into_body()).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(get_with_token("/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "admin@example.com");
    assert!(users[0].get("_id").is_some());
    assert!(users[0].get("passwordHash").is_none());
}
