use super::AppError;

/// Body text for requests that match no route
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "The requested resource was not found";

/// Router fallback; renders the standard error body with 404.
pub async fn not_found() -> AppError {
    AppError::NotFound(ROUTE_NOT_FOUND_MESSAGE.to_owned())
}
