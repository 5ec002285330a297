use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::Argon2Hasher;
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible, so startup errors render with span traces
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(
        config.database.clone(),
        config.retry.clone(),
    )
    .await
    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    let hasher = Argon2Hasher::new(config.hasher)
        .map_err(|e| eyre::eyre!("Invalid hasher configuration: {}", e))?;

    let state = AppState { config, db, hasher };
    let app = app(&state);

    let AppState { config, db, .. } = state;
    info!(
        "Starting {} with graceful shutdown ({:?} timeout)",
        config.app.name, config.shutdown_timeout
    );

    create_production_app(app, &config.server, config.shutdown_timeout, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(()) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Garage API shutdown complete");
    Ok(())
}

/// Full application router: `/api/*`, Swagger UI, `/health` and `/ready`
fn app(state: &AppState) -> Router {
    create_router::<openapi::ApiDoc>(api::routes(state))
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
}
