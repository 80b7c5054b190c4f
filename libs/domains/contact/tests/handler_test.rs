//! Handler tests for the contact form endpoint

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_contact::*;
use email::{EmailError, MockEmailProvider};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

fn app(provider: MockEmailProvider) -> Router {
    let notifier =
        ContactNotifier::new(provider, ContactConfig::new("owner@shop.test")).unwrap();
    handlers::router(notifier)
}

fn submission() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "subject": "Wholesale",
        "message": "Do you sell in bulk?"
    })
}

async fn post(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_submission_is_sent() {
    let provider = MockEmailProvider::new();

    let (status, body) = post(app(provider.clone()), submission().to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Your message has been sent successfully!");

    let sent = provider.sent_emails().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Contact Form Submission: Wholesale");
    assert!(sent[0].body_html.as_deref().unwrap().contains("555-0100"));
}

#[tokio::test]
async fn test_missing_subject_is_400() {
    let provider = MockEmailProvider::new();
    let mut body = submission();
    body.as_object_mut().unwrap().remove("subject");

    let (status, body) = post(app(provider.clone()), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Please fill in all required fields.");
    assert_eq!(provider.sent_count().await, 0);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let (status, body) = post(app(MockEmailProvider::new()), "{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_auth_failure_message() {
    let provider = MockEmailProvider::failing(EmailError::Authentication("535 5.7.8".into()));

    let (status, body) = post(app(provider), submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Authentication failed. Please check your email credentials (EMAIL_USER and EMAIL_PASS) in the .env file."
    );
}

#[tokio::test]
async fn test_envelope_failure_message() {
    let provider = MockEmailProvider::failing(EmailError::Envelope("550 no such user".into()));

    let (status, body) = post(app(provider), submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Failed to send email. Please check the recipient email address or your email service configuration."
    );
}

#[tokio::test]
async fn test_transport_failure_message() {
    let provider = MockEmailProvider::failing(EmailError::Transport("connection refused".into()));

    let (status, body) = post(app(provider), submission().to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "There was an error sending your message. Please try again later."
    );
}
