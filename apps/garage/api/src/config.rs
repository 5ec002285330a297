use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;
use domain_users::HasherConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub retry: RetryConfig,
    pub hasher: HasherConfig,
    /// `RUN_MIGRATIONS` (default: true)
    pub run_migrations: bool,
    /// `SHUTDOWN_TIMEOUT_SECS` (default: 30)
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let retry = RetryConfig::from_env()?;
        let hasher = HasherConfig::from_env()?;
        let run_migrations = env_parse("RUN_MIGRATIONS", "true")?;
        let shutdown_timeout = Duration::from_secs(env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?);

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            retry,
            hasher,
            run_migrations,
            shutdown_timeout,
        })
    }
}
