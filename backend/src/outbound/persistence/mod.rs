//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here are thin translators between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; connections come from a `bb8` pool over
//! `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use marquee::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/marquee")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_alert_preference_repository;
mod diesel_comments_repository;
mod diesel_favorites_repository;
pub(crate) mod diesel_helpers;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_alert_preference_repository::DieselAlertPreferenceRepository;
pub use diesel_comments_repository::DieselCommentsRepository;
pub use diesel_favorites_repository::DieselFavoritesRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
