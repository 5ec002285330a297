//! Reference Domain
//!
//! Single-column lookup tables (`make`, `color`, `location`) that listings
//! pick their values from. One generic stack serves every table; the
//! [`ReferenceKind`] decides the table, the JSON field and the messages.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_reference::{handlers, InMemoryReferenceRepository, ReferenceKind, ReferenceService};
//!
//! let service = ReferenceService::new(ReferenceKind::Make, InMemoryReferenceRepository::new());
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod kind;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ReferenceError, ReferenceResult};
pub use kind::ReferenceKind;
pub use models::{ReferenceEntry, ReferenceView};
pub use postgres::PgReferenceRepository;
pub use repository::{InMemoryReferenceRepository, ReferenceRepository};
pub use service::ReferenceService;
