//! Users Domain
//!
//! Self-service registration gated by a password policy and an allow-list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /users, status/body mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← presence → policy → allow-list → duplicate → hash → insert
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───┐ ┌─▼──────────┐
//! │Hasher│ │ Repository │  ← Argon2id / users + allowed_users
//! └──────┘ └────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod hasher;
pub mod models;
pub mod password_policy;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ErrorKind, UserError, UserResult};
pub use hasher::{Argon2Hasher, CredentialHasher, HasherConfig};
pub use models::{AllowedEmail, RegisterUser, User, UserResponse};
pub use password_policy::PolicyError;
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
