//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AlertPreferencesCommand, AlertPreferencesQuery, CommentsCommand, CommentsQuery,
    FavoritesCommand, FavoritesQuery, IdentityReconciliation, IdentityVerifier, MetadataQuery,
    UserProfileCommand, UserProfileQuery,
};
use crate::domain::ports::{
    FixtureAlertPreferencesCommand, FixtureAlertPreferencesQuery, FixtureCommentsCommand,
    FixtureCommentsQuery, FixtureFavoritesCommand, FixtureFavoritesQuery,
    FixtureIdentityReconciliation, FixtureIdentityVerifier, FixtureMetadataQuery,
    FixtureUserProfileCommand, FixtureUserProfileQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
///
/// [`Default`] wires the fixture implementations, which lets callers
/// override only the ports they have real adapters for.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub identity: Arc<dyn IdentityReconciliation>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
    pub alerts: Arc<dyn AlertPreferencesCommand>,
    pub alerts_query: Arc<dyn AlertPreferencesQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub metadata: Arc<dyn MetadataQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            identity_verifier: Arc::new(FixtureIdentityVerifier),
            identity: Arc::new(FixtureIdentityReconciliation),
            profile: Arc::new(FixtureUserProfileQuery),
            profile_command: Arc::new(FixtureUserProfileCommand),
            favorites: Arc::new(FixtureFavoritesCommand),
            favorites_query: Arc::new(FixtureFavoritesQuery),
            alerts: Arc::new(FixtureAlertPreferencesCommand),
            alerts_query: Arc::new(FixtureAlertPreferencesQuery),
            comments: Arc::new(FixtureCommentsCommand),
            comments_query: Arc::new(FixtureCommentsQuery),
            metadata: Arc::new(FixtureMetadataQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers and the identity middleware.
#[derive(Clone)]
pub struct HttpState {
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub identity: Arc<dyn IdentityReconciliation>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub profile_command: Arc<dyn UserProfileCommand>,
    pub favorites: Arc<dyn FavoritesCommand>,
    pub favorites_query: Arc<dyn FavoritesQuery>,
    pub alerts: Arc<dyn AlertPreferencesCommand>,
    pub alerts_query: Arc<dyn AlertPreferencesQuery>,
    pub comments: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub metadata: Arc<dyn MetadataQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use marquee::domain::ports::FixtureMetadataQuery;
    /// use marquee::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     metadata: Arc::new(FixtureMetadataQuery),
    ///     ..HttpStatePorts::default()
    /// };
    /// let state = HttpState::new(ports);
    /// let _metadata = state.metadata.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity_verifier,
            identity,
            profile,
            profile_command,
            favorites,
            favorites_query,
            alerts,
            alerts_query,
            comments,
            comments_query,
            metadata,
        } = ports;
        Self {
            identity_verifier,
            identity,
            profile,
            profile_command,
            favorites,
            favorites_query,
            alerts,
            alerts_query,
            comments,
            comments_query,
            metadata,
        }
    }
}
