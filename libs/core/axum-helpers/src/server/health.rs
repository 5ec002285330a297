use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// One named dependency probe; `Err` carries the reason for the log.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Run every probe concurrently and fold the outcomes into a readiness
/// response.
///
/// The body maps each probe name to `connected`/`disconnected` next to an
/// overall `status` of `ready` or `not ready`; any failure makes it a 503.
/// Failure reasons are logged, never returned.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
///     ("database", Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) })),
/// ];
/// run_health_checks(checks).await.into_response()
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> (StatusCode, Json<Value>) {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let outcomes = join_all(probes).await;

    let mut body = Map::new();
    let mut ready = true;
    for (name, outcome) in names.into_iter().zip(outcomes) {
        let state = match outcome {
            Ok(()) => "connected",
            Err(reason) => {
                tracing::error!(check = name, %reason, "Readiness check failed");
                ready = false;
                "disconnected"
            }
        };
        body.insert(name.to_owned(), state.into());
    }

    let (status, summary) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    };
    body.insert("status".to_owned(), summary.into());

    (status, Json(Value::Object(body)))
}

/// Liveness: 200 whenever the process can answer at all.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
    .into_response()
}

/// `GET /health` reporting `app_info`
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
