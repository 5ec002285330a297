//! Process-wide error reporting and log subscriber setup.

use crate::Environment;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directives when `RUST_LOG` is unset. SQL statement logs stay at
/// `warn` so request handling is readable.
const PRODUCTION_FILTER: &str = "info,sea_orm=warn,sqlx=warn";
const DEVELOPMENT_FILTER: &str = "debug,hyper=info,h2=info,sqlx=warn";

/// Install the color-eyre panic and report hooks. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .install();
}

/// Install the global subscriber for `environment`.
///
/// Production emits flattened JSON events; development pretty-prints them
/// with their targets. Both carry a `tracing_error::ErrorLayer` so eyre
/// reports capture span traces. Only the first call in a process installs
/// anything.
pub fn init_tracing(environment: &Environment) {
    let default_filter = if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let format: Box<dyn Layer<Registry> + Send + Sync> = if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().pretty().with_file(false).boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(format)
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    }
}
