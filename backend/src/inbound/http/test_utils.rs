//! Test helpers for inbound HTTP components.
//!
//! Handler tests drive the real domain services over
//! [`InMemoryUserStore`] so no database is needed.

use std::sync::Arc;

use crate::domain::ports::{FIXTURE_TOKEN_PREFIX, FixtureIdentityVerifier};
use crate::domain::{
    AlertsService, CommentsService, FavoritesService, IdentityReconciler, ProfileService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryUserStore;

/// `Authorization` header value accepted by [`FixtureIdentityVerifier`].
pub fn bearer_header(subject: &str) -> String {
    format!("Bearer {FIXTURE_TOKEN_PREFIX}{subject}")
}

/// Build HTTP state whose user-state ports run the real services over
/// `store`, with fixture identity verification.
pub fn in_memory_state(store: Arc<InMemoryUserStore>) -> HttpState {
    let profile = Arc::new(ProfileService::new(Arc::clone(&store)));
    let favorites = Arc::new(FavoritesService::new(Arc::clone(&store)));
    let alerts = Arc::new(AlertsService::new(Arc::clone(&store)));
    let comments = Arc::new(CommentsService::new(Arc::clone(&store)));
    HttpState::new(HttpStatePorts {
        identity_verifier: Arc::new(FixtureIdentityVerifier),
        identity: Arc::new(IdentityReconciler::new(Arc::clone(&store))),
        profile: profile.clone(),
        profile_command: profile,
        favorites: favorites.clone(),
        favorites_query: favorites,
        alerts: alerts.clone(),
        alerts_query: alerts,
        comments: comments.clone(),
        comments_query: comments,
        ..HttpStatePorts::default()
    })
}
