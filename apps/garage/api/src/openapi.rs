use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse)),
    info(
        title = "Garage API",
        version = "0.1.0",
        description = "User registration and the make, color and location reference tables"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/make", api = domain_reference::handlers::ApiDoc),
        (path = "/color", api = domain_reference::handlers::ApiDoc),
        (path = "/location", api = domain_reference::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
