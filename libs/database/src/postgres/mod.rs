//! PostgreSQL pool setup, migrations, and health probing

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect_from_config_with_retry, connect_with_options, run_migrations};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection};
pub use sea_orm_migration::MigratorTrait;
