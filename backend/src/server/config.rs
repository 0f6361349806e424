//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use marquee::domain::ports::{IdentityVerifier, MetadataQuery};
use marquee::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) identity_verifier: Arc<dyn IdentityVerifier>,
    pub(crate) metadata: Arc<dyn MetadataQuery>,
}

impl ServerConfig {
    /// Construct a configuration without a database; user-state ports use
    /// an in-memory store until [`ServerConfig::with_db_pool`] is called.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        identity_verifier: Arc<dyn IdentityVerifier>,
        metadata: Arc<dyn MetadataQuery>,
    ) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            identity_verifier,
            metadata,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
