//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **tmdb**: reqwest client for the metadata API
//! - **identity**: Firebase ID-token verification
//! - **memory**: process-local user state used when no database is set
//!
//! Adapters translate between domain types and wire or row representations.
//! They contain no business logic.

pub mod identity;
pub mod memory;
pub mod persistence;
pub mod tmdb;
