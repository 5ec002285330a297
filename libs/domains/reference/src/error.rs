use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::kind::ReferenceKind;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("'{0}' already taken")]
    AlreadyTaken(String),

    #[error("{} does not exist", .0.label())]
    NotFound(ReferenceKind),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;

impl From<ReferenceError> for AppError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::NotFound(_) => AppError::NotFound(err.to_string()),
            ReferenceError::Internal(msg) => AppError::InternalServerError(msg),
            ReferenceError::MissingField(_)
            | ReferenceError::AlreadyExists(_)
            | ReferenceError::AlreadyTaken(_) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ReferenceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
