//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityVerifier`], [`MetadataSource`])
//! are implemented by outbound adapters. Driving ports (`*Command`,
//! `*Query`, [`IdentityReconciliation`]) are implemented by domain services
//! and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod alert_preference_repository;
mod alert_preferences_command;
mod alert_preferences_query;
mod comments_command;
mod comments_query;
mod comments_repository;
mod favorites_command;
mod favorites_query;
mod favorites_repository;
mod identity_reconciliation;
mod identity_verifier;
mod metadata_query;
mod metadata_source;
mod user_profile_command;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use alert_preference_repository::MockAlertPreferenceRepository;
pub use alert_preference_repository::{AlertPreferenceRepository, AlertPreferenceRepositoryError};
#[cfg(test)]
pub use alert_preferences_command::MockAlertPreferencesCommand;
pub use alert_preferences_command::{AlertPreferencesCommand, FixtureAlertPreferencesCommand};
#[cfg(test)]
pub use alert_preferences_query::MockAlertPreferencesQuery;
pub use alert_preferences_query::{AlertPreferencesQuery, FixtureAlertPreferencesQuery};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::{CommentsCommand, FixtureCommentsCommand};
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use comments_query::{CommentsQuery, FixtureCommentsQuery};
#[cfg(test)]
pub use comments_repository::MockCommentsRepository;
pub use comments_repository::{CommentsRepository, CommentsRepositoryError};
#[cfg(test)]
pub use favorites_command::MockFavoritesCommand;
pub use favorites_command::{FavoritesCommand, FixtureFavoritesCommand};
#[cfg(test)]
pub use favorites_query::MockFavoritesQuery;
pub use favorites_query::{FavoritesQuery, FixtureFavoritesQuery};
#[cfg(test)]
pub use favorites_repository::MockFavoritesRepository;
pub use favorites_repository::{FavoritesRepository, FavoritesRepositoryError};
#[cfg(test)]
pub use identity_reconciliation::MockIdentityReconciliation;
pub use identity_reconciliation::{FixtureIdentityReconciliation, IdentityReconciliation};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{
    FIXTURE_TOKEN_PREFIX, FixtureIdentityVerifier, IdentityVerificationError, IdentityVerifier,
};
#[cfg(test)]
pub use metadata_query::MockMetadataQuery;
pub use metadata_query::{FixtureMetadataQuery, MetadataQuery};
#[cfg(test)]
pub use metadata_source::MockMetadataSource;
pub use metadata_source::{MetadataSource, MetadataSourceError};
#[cfg(test)]
pub use user_profile_command::MockUserProfileCommand;
pub use user_profile_command::{FixtureUserProfileCommand, UserProfileCommand};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{Reconciliation, UserPersistenceError, UserRepository};
