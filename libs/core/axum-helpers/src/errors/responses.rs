//! Named OpenAPI responses shared by the domain `ApiDoc`s.
//!
//! Each wraps [`ErrorResponse`], so every documented failure has the
//! `{ "error": ... }` shape.

use super::ErrorResponse;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Store or hashing failure; the cause is only logged",
    content_type = "application/json",
    example = json!({ "error": "An internal error occurred" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Missing field, malformed body or rejected input",
    content_type = "application/json",
    example = json!({ "error": "Missing 'email' in request body" })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "No row with that id",
    content_type = "application/json",
    example = json!({ "error": "Location does not exist" })
)]
pub struct NotFoundResponse(pub ErrorResponse);
