//! PostgreSQL connection management shared by the API and the test harness.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(
//!     PostgresConfig::from_env()?,
//!     RetryConfig::from_env()?,
//! )
//! .await?;
//! postgres::run_migrations::<Migrator>(&db, "garage_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
