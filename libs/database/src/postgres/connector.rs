use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};

/// Open a pool with explicit options.
pub async fn connect_with_options(options: ConnectOptions) -> DatabaseResult<DatabaseConnection> {
    let db = Database::connect(options).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool, retrying with exponential backoff while the server comes up.
///
/// ```ignore
/// let db = connect_from_config_with_retry(
///     PostgresConfig::from_env()?,
///     RetryConfig::new().with_max_retries(5),
/// )
/// .await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry: RetryConfig,
) -> DatabaseResult<DatabaseConnection> {
    let options = config.into_connect_options();
    retry_with_backoff(|| connect_with_options(options.clone()), retry).await
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(db: &DatabaseConnection, app_name: &str) -> DatabaseResult<()> {
    info!(app = app_name, "Applying pending migrations");
    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!(app = app_name, "Migrations applied");
    Ok(())
}
