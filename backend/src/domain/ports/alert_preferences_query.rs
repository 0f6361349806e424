//! Driving port for reading alert preferences.

use async_trait::async_trait;

use crate::domain::{AlertPreference, Error, SubjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertPreferencesQuery: Send + Sync {
    /// Return the stored preference, or the unsaved default.
    async fn get(&self, subject_id: &SubjectId) -> Result<AlertPreference, Error>;
}

/// Fixture query returning the default preference.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertPreferencesQuery;

#[async_trait]
impl AlertPreferencesQuery for FixtureAlertPreferencesQuery {
    async fn get(&self, _subject_id: &SubjectId) -> Result<AlertPreference, Error> {
        Ok(AlertPreference::default())
    }
}
