//! Builders for HTTP state ports and repository-backed service pairs.

use std::sync::Arc;

use actix_web::web;

use marquee::domain::ports::{
    AlertPreferencesCommand, AlertPreferencesQuery, CommentsCommand, CommentsQuery,
    FavoritesCommand, FavoritesQuery, IdentityReconciliation, UserProfileCommand,
    UserProfileQuery,
};
use marquee::domain::{
    AlertsService, CommentsService, FavoritesService, IdentityReconciler, ProfileService,
};
use marquee::inbound::http::state::{HttpState, HttpStatePorts};
use marquee::outbound::memory::InMemoryUserStore;
use marquee::outbound::persistence::{
    DbPool, DieselAlertPreferenceRepository, DieselCommentsRepository,
    DieselFavoritesRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Backing storage for the user-state services.
enum UserStore<'a> {
    Postgres(&'a DbPool),
    Memory(Arc<InMemoryUserStore>),
}

impl<'a> UserStore<'a> {
    fn select(pool: Option<&'a DbPool>) -> Self {
        match pool {
            Some(pool) => Self::Postgres(pool),
            None => Self::Memory(Arc::new(InMemoryUserStore::default())),
        }
    }
}

/// Generate a builder returning one service as both its command and query
/// port, over Diesel or the in-memory store.
macro_rules! build_pair {
    (
        $fn_name:ident,
        $cmd_trait:ident,
        $query_trait:ident,
        $repo_ctor:path,
        $service_ctor:path
    ) => {
        fn $fn_name(store: &UserStore<'_>) -> (Arc<dyn $cmd_trait>, Arc<dyn $query_trait>) {
            fn split<S>(service: Arc<S>) -> (Arc<dyn $cmd_trait>, Arc<dyn $query_trait>)
            where
                S: $cmd_trait + $query_trait + 'static,
            {
                (service.clone() as Arc<dyn $cmd_trait>, service as Arc<dyn $query_trait>)
            }

            match store {
                UserStore::Postgres(pool) => {
                    split(Arc::new($service_ctor(Arc::new($repo_ctor((*pool).clone())))))
                }
                UserStore::Memory(memory) => split(Arc::new($service_ctor(Arc::clone(memory)))),
            }
        }
    };
}

build_pair!(
    build_profile_pair,
    UserProfileCommand,
    UserProfileQuery,
    DieselUserRepository::new,
    ProfileService::new
);

build_pair!(
    build_favorites_pair,
    FavoritesCommand,
    FavoritesQuery,
    DieselFavoritesRepository::new,
    FavoritesService::new
);

build_pair!(
    build_alerts_pair,
    AlertPreferencesCommand,
    AlertPreferencesQuery,
    DieselAlertPreferenceRepository::new,
    AlertsService::new
);

build_pair!(
    build_comments_pair,
    CommentsCommand,
    CommentsQuery,
    DieselCommentsRepository::new,
    CommentsService::new
);

fn build_identity_reconciliation(store: &UserStore<'_>) -> Arc<dyn IdentityReconciliation> {
    match store {
        UserStore::Postgres(pool) => Arc::new(IdentityReconciler::new(Arc::new(
            DieselUserRepository::new((*pool).clone()),
        ))),
        UserStore::Memory(memory) => Arc::new(IdentityReconciler::new(Arc::clone(memory))),
    }
}

/// Build the shared HTTP state from configured adapters.
///
/// Without a pool every user-state service shares one in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let store = UserStore::select(config.db_pool.as_ref());
    let (profile_command, profile) = build_profile_pair(&store);
    let (favorites, favorites_query) = build_favorites_pair(&store);
    let (alerts, alerts_query) = build_alerts_pair(&store);
    let (comments, comments_query) = build_comments_pair(&store);

    web::Data::new(HttpState::new(HttpStatePorts {
        identity_verifier: Arc::clone(&config.identity_verifier),
        identity: build_identity_reconciliation(&store),
        profile,
        profile_command,
        favorites,
        favorites_query,
        alerts,
        alerts_query,
        comments,
        comments_query,
        metadata: Arc::clone(&config.metadata),
    }))
}
