use axum::{
    Router,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, JsonBody, SanitizedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{error::ReferenceResult, repository::ReferenceRepository, service::ReferenceService};

/// OpenAPI documentation shared by every reference table.
///
/// Bodies carry the table's own name field (`make_name`, `color_name`,
/// `location_name`).
#[derive(OpenApi)]
#[openapi(
    paths(list_entries, create_entry, get_entry, update_entry, delete_entry),
    components(responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)),
    tags(
        (name = "reference", description = "Make, color and location lookup tables")
    )
)]
pub struct ApiDoc;

/// Create the router for one reference table
pub fn router<R>(service: ReferenceService<R>) -> Router
where
    R: ReferenceRepository + 'static,
{
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route(
            "/{id}",
            get(get_entry).patch(update_entry).delete(delete_entry),
        )
        .with_state(Arc::new(service))
}

/// List every entry
#[utoipa::path(
    get,
    path = "",
    tag = "reference",
    responses(
        (status = 200, description = "Array of `{ id, <table>_name }`"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_entries<R>(
    State(service): State<Arc<ReferenceService<R>>>,
) -> ReferenceResult<impl IntoResponse>
where
    R: ReferenceRepository,
{
    let entries = service.list().await?;
    Ok(SanitizedJson(entries))
}

/// Add an entry
#[utoipa::path(
    post,
    path = "",
    tag = "reference",
    responses(
        (status = 201, description = "Entry created; body is `{ id, <table>_name }`",
            headers(("Location" = String, description = "Path of the new entry"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_entry<R>(
    State(service): State<Arc<ReferenceService<R>>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> ReferenceResult<impl IntoResponse>
where
    R: ReferenceRepository,
{
    let entry = service.create(body).await?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), entry.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        SanitizedJson(entry),
    ))
}

/// Fetch one entry
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "reference",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 200, description = "`{ id, <table>_name }`"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_entry<R>(
    State(service): State<Arc<ReferenceService<R>>>,
    IdPath(id): IdPath,
) -> ReferenceResult<impl IntoResponse>
where
    R: ReferenceRepository,
{
    let entry = service.get(id).await?;
    Ok(SanitizedJson(entry))
}

/// Rename an entry
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "reference",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry renamed"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_entry<R>(
    State(service): State<Arc<ReferenceService<R>>>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> ReferenceResult<impl IntoResponse>
where
    R: ReferenceRepository,
{
    service.update(id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove an entry
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "reference",
    params(("id" = i32, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_entry<R>(
    State(service): State<Arc<ReferenceService<R>>>,
    IdPath(id): IdPath,
) -> ReferenceResult<impl IntoResponse>
where
    R: ReferenceRepository,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
