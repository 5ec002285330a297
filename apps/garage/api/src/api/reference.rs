use axum::Router;
use domain_reference::{PgReferenceRepository, ReferenceKind, ReferenceService, handlers};
use strum::IntoEnumIterator;

use crate::state::AppState;

/// One router per reference table, each at `/<table>`
pub fn routes(state: &AppState) -> Router {
    ReferenceKind::iter().fold(Router::new(), |router, kind| {
        let repository = PgReferenceRepository::new(state.db.clone(), kind);
        let service = ReferenceService::new(kind, repository);
        router.nest(&kind.route(), handlers::router(service))
    })
}
