use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{AllowedEmail, User};

/// Persistence for registered users and the registration allow-list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up an allow-list entry by exact email
    async fn find_allowed_by_email(&self, email: &str) -> UserResult<Option<AllowedEmail>>;

    /// Look up a registered user by exact email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Insert a user, assigning its id.
    ///
    /// Fails with [`UserError::ConstraintViolation`] when the email is taken.
    async fn insert_user(&self, email: &str, password_hash: &str) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct Tables {
    allowed: HashMap<String, AllowedEmail>,
    users: HashMap<String, User>,
    next_allowed_id: i32,
    next_user_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `email` to the allow-list. Re-adding an email is a no-op.
    pub async fn allow(&self, email: impl Into<String>) -> AllowedEmail {
        let email = email.into();
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.allowed.get(&email) {
            return existing.clone();
        }

        tables.next_allowed_id += 1;
        let entry = AllowedEmail {
            id: tables.next_allowed_id,
            email: email.clone(),
        };
        tables.allowed.insert(email, entry.clone());
        entry
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_allowed_by_email(&self, email: &str) -> UserResult<Option<AllowedEmail>> {
        let tables = self.tables.read().await;
        Ok(tables.allowed.get(email).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(email).cloned())
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> UserResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(email) {
            return Err(UserError::ConstraintViolation(format!(
                "users.email '{}' already exists",
                email
            )));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.email.clone(), user.clone());

        tracing::debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }
}
