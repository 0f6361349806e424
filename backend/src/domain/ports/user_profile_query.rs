//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load a user's profile without importing
//! persistence details.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, LocalUser, SubjectId};

/// Domain use-case port for reading the caller's cached profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the stored profile, or `NotFound` when no row exists.
    async fn fetch_profile(&self, subject_id: &SubjectId) -> Result<LocalUser, Error>;
}

/// Fixture profile query used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileQuery;

#[async_trait]
impl UserProfileQuery for FixtureUserProfileQuery {
    async fn fetch_profile(&self, subject_id: &SubjectId) -> Result<LocalUser, Error> {
        Ok(LocalUser {
            subject_id: subject_id.clone(),
            email: None,
            display_name: Some("Ada Lovelace".to_owned()),
            avatar_url: None,
            created_at: Utc::now(),
        })
    }
}
