//! HTTP handlers for Orders API

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    auth::MSG_TOKEN_FAILED,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, AdminUser, AppError, AuthUser, ErrorResponse, JwtAuth, JwtClaims, UuidPath,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, MessageResponse, Order, OrderDetails, OrderItem, OrderItemDetails, PaymentResult,
    ProductRef, Requester, ShippingAddress, UpdateOrderStatus, UserRef,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for Orders API
#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, update_order, delete_order),
    components(
        schemas(
            Order,
            OrderItem,
            ShippingAddress,
            PaymentResult,
            CreateOrder,
            UpdateOrderStatus,
            OrderDetails,
            OrderItemDetails,
            UserRef,
            ProductRef,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order placement and fulfilment endpoints")
    )
)]
pub struct ApiDoc;

/// Every order route requires a bearer token; status changes and deletes need an admin.
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service)
}

fn requester(claims: &JwtClaims) -> Result<Requester, AppError> {
    let user_id = claims.user_id().map_err(|_| {
        tracing::warn!(sub = %claims.sub, "Token subject is not a user id");
        AppError::Unauthorized(MSG_TOKEN_FAILED.to_string())
    })?;
    Ok(Requester {
        user_id,
        is_admin: claims.is_admin(),
    })
}

/// List orders: all for admins, own for everyone else
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of orders, newest first", body = Vec<Order>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    AuthUser(claims): AuthUser,
    State(service): State<Arc<OrderService<R>>>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = service.list_orders(&requester(&claims)?).await?;
    Ok(Json(orders))
}

/// Place an order for the authenticated user
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created successfully", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    AuthUser(claims): AuthUser,
    State(service): State<Arc<OrderService<R>>>,
    payload: Result<Json<CreateOrder>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let requester = requester(&claims)?;
    // Validated in the service so an empty order is reported before field errors
    let Json(input) = payload?;
    let order = service.create_order(requester.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get one order with its user and products resolved
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderDetails),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    AuthUser(claims): AuthUser,
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> Result<Json<OrderDetails>, AppError> {
    let details = service.get_order(id, &requester(&claims)?).await?;
    Ok(Json(details))
}

/// Update payment and delivery status
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Order updated successfully", body = Order),
        (status = 400, response = BadRequestUuidResponse),
        (status = 422, description = "Malformed status update", body = ErrorResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R: OrderRepository>(
    AdminUser(admin): AdminUser,
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
    payload: Result<Json<UpdateOrderStatus>, JsonRejection>,
) -> Result<Json<Order>, AppError> {
    let Json(update) = payload?;
    let order = service.update_status(id, update).await?;
    tracing::info!(admin_id = %admin.sub, order_id = %id, "Order status updated");
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order removed", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    AdminUser(admin): AdminUser,
    State(service): State<Arc<OrderService<R>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<MessageResponse>> {
    service.delete_order(id).await?;
    tracing::info!(admin_id = %admin.sub, order_id = %id, "Order removed");
    Ok(Json(MessageResponse {
        message: "Order removed".to_string(),
    }))
}
