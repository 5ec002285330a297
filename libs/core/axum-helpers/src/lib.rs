//! # Axum Helpers
//!
//! Utilities shared by every HTTP surface in the workspace.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError` and the `{ "error": "..." }` response body
//! - **[`extractors`]**: lenient JSON body and integer id path extractors
//! - **[`sanitize`]**: sanitize-before-serialize for outward-facing text
//! - **[`server`]**: router setup, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let app = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//! create_production_app(app, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod sanitize;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

// Re-export error types
pub use errors::{AppError, ErrorResponse, INTERNAL_ERROR_MESSAGE};

// Re-export extractors
pub use extractors::{IdPath, JsonBody};

// Re-export sanitize helpers
pub use sanitize::{Sanitize, SanitizedJson, escape_html};
