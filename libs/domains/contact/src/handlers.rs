//! HTTP handler for the contact form

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use email::EmailProvider;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ContactError, ContactResult};
use crate::models::{ContactRequest, ContactResponse};
use crate::service::ContactNotifier;

#[derive(OpenApi)]
#[openapi(
    paths(submit_contact),
    components(schemas(ContactRequest, ContactResponse)),
    tags(
        (name = "Contact", description = "Contact form delivery")
    )
)]
pub struct ApiDoc;

pub fn router<P: EmailProvider + 'static>(notifier: ContactNotifier<P>) -> Router {
    Router::new()
        .route("/", post(submit_contact))
        .with_state(Arc::new(notifier))
}

/// Send a contact form submission to the shop owner
#[utoipa::path(
    post,
    path = "",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message sent", body = ContactResponse),
        (status = 400, description = "Required fields missing", body = ContactResponse),
        (status = 500, description = "Mail delivery failed", body = ContactResponse)
    )
)]
async fn submit_contact<P: EmailProvider>(
    State(notifier): State<Arc<ContactNotifier<P>>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> ContactResult<Json<ContactResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Unreadable contact body: {}", rejection);
        ContactError::MissingFields
    })?;

    notifier.send(request).await?;
    Ok(Json(ContactResponse::sent()))
}
