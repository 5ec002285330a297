use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use axum::Router;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wrap the application's API routes with the shared HTTP surface:
///
/// - `apis` nested under `/api`
/// - Swagger UI at `/swagger-ui`, document at `/api-docs/openapi.json`
/// - JSON 404 fallback
/// - request spans at `INFO` and response compression
///
/// `/health` and `/ready` are merged in by the binary, which owns the
/// dependencies the readiness check needs.
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .nest("/api", apis)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .fallback(not_found)
        .layer(trace)
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then drain in-flight requests and
/// run `cleanup` for at most `cleanup_timeout`.
///
/// `cleanup` also runs when serving fails, so pools are closed on every exit
/// path after the listener was bound.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.socket_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    let signal_task = tokio::spawn(async move { signals.trigger_on_signal().await });

    let drained = coordinator.clone();
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(async move { drained.triggered().await })
        .await;

    if let Err(e) = &served {
        tracing::error!("Server stopped with an error: {}", e);
    }
    coordinator.trigger();
    signal_task.abort();

    info!("Running cleanup (timeout: {:?})", cleanup_timeout);
    if tokio::time::timeout(cleanup_timeout, cleanup).await.is_err() {
        warn!("Cleanup did not finish within {:?}", cleanup_timeout);
    }

    served
}
