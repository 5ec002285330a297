use sea_orm::DbErr;

/// Failures of pool-level operations (connect, migrate, probe)
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
