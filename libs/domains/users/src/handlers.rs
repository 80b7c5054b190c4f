//! HTTP handlers for registration, login and the user directory

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware, AdminUser, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, Role, UserProfile, UserSummary};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the auth and user endpoints
#[derive(OpenApi)]
#[openapi(
    paths(register, login, list_users),
    components(
        schemas(AuthResponse, LoginRequest, RegisterRequest, Role, UserProfile, UserSummary),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "Administrator user directory")
    )
)]
pub struct ApiDoc;

/// `/auth/*` is public; `/users` sits behind the bearer middleware.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let auth = service.jwt().clone();
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware));

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected)
        .with_state(shared_service)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<Json<AuthResponse>> {
    let response = service.register(input).await?;
    Ok(Json(response))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// List all users (administrators only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users, newest first", body = Vec<UserProfile>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    AdminUser(admin): AdminUser,
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserProfile>>> {
    tracing::debug!(admin_id = %admin.sub, "Listing users");
    let users = service.list_users().await?;
    Ok(Json(users))
}
