use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::password_policy::PolicyError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidPassword(#[from] PolicyError),

    #[error("Email provided is not allowed to register")]
    NotAllowlisted,

    #[error("Email already registered")]
    AlreadyRegistered,

    /// Unique index rejected an insert that raced past the duplicate check
    #[error("Unique constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Failure classes, each with its own reporting policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client input is malformed or violates the password policy
    Validation,
    /// Email is not on the allow-list
    Authorization,
    /// Email already belongs to a user
    Conflict,
    /// Store or hasher failed; details stay in the logs
    Infrastructure,
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::MissingField(_) | UserError::InvalidPassword(_) => ErrorKind::Validation,
            UserError::NotAllowlisted => ErrorKind::Authorization,
            UserError::AlreadyRegistered | UserError::ConstraintViolation(_) => ErrorKind::Conflict,
            UserError::PasswordHash(_) | UserError::Internal(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err.kind() {
            // A racing insert is reported exactly like the duplicate check.
            ErrorKind::Conflict => AppError::BadRequest(UserError::AlreadyRegistered.to_string()),
            ErrorKind::Validation | ErrorKind::Authorization => AppError::BadRequest(err.to_string()),
            ErrorKind::Infrastructure => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
