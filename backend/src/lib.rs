//! Recipe API backend.
//!
//! A session-authenticated HTTP service for recipes, with per-user tags and
//! ingredients reconciled by name. The crate follows a ports and adapters
//! layout:
//!
//! - [`domain`]: validated types, ports and the services implementing them
//! - [`inbound`]: Actix handlers translating HTTP into port calls
//! - [`outbound`]: Diesel and in-memory repository adapters
//! - [`middleware`]: request tracing
//! - [`config`]: runtime settings

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
