use axum::{
    Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    JsonBody, SanitizedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::UserResult,
    hasher::CredentialHasher,
    models::{RegisterUser, UserResponse},
    repository::UserRepository,
    service::UserService,
};

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(register_user),
    components(
        schemas(RegisterUser, UserResponse),
        responses(BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "users", description = "Self-service registration for allow-listed emails")
    )
)]
pub struct ApiDoc;

/// Create the users router
pub fn router<R, H>(service: UserService<R, H>) -> Router
where
    R: UserRepository + 'static,
    H: CredentialHasher + 'static,
{
    Router::new()
        .route("/", post(register_user))
        .with_state(Arc::new(service))
}

/// Register a new user
///
/// The email must be on the allow-list and not yet registered.
#[utoipa::path(
    post,
    path = "",
    tag = "users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = UserResponse,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register_user<R, H>(
    State(service): State<Arc<UserService<R, H>>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(input): JsonBody<RegisterUser>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository,
    H: CredentialHasher,
{
    let user = service.register(input).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), user.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        SanitizedJson(user),
    ))
}
