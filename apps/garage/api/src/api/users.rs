use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::with_hasher(repository, state.hasher.clone());
    handlers::router(service)
}
