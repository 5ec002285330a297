use axum_helpers::{Sanitize, escape_html};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration request body.
///
/// Both fields are optional at the type level so a missing field can be
/// reported by name instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterUser {
    #[schema(example = "allowed@email.com")]
    pub email: Option<String>,
    #[schema(example = "1Aa!2Bb@")]
    pub password: Option<String>,
}

impl RegisterUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

/// Stored user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// PHC-encoded Argon2id hash; never serialized
    pub password_hash: String,
}

/// Allow-list entry; provisioned out of band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedEmail {
    pub id: i32,
    pub email: String,
}

/// Outward view of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "allowed@email.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl Sanitize for UserResponse {
    fn sanitize(self) -> Self {
        Self {
            id: self.id,
            email: escape_html(&self.email),
        }
    }
}
