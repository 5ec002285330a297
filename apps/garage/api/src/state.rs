//! Shared application state.

use domain_users::Argon2Hasher;

/// State handed to every router builder; clones share the pool.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Registration hasher, built once from `config.hasher`
    pub hasher: Argon2Hasher,
}
