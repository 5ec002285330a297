use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub mod health;
pub mod reference;
pub mod users;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every sub-router has its state applied, so the result is stateless.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .merge(reference::routes(state))
}

/// `/ready` with a real database check, merged next to `/health`
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
