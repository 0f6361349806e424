//! Marquee backend: a metadata proxy and per-user state service.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, ports and
//! services; [`inbound`] adapts HTTP requests onto driving ports; and
//! [`outbound`] implements driven ports against Postgres, the metadata API and
//! the identity provider.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
