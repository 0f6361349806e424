//! Driving port for writing alert preferences.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{AlertPreference, AlertPreferenceUpdate, Error, SubjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertPreferencesCommand: Send + Sync {
    /// Create or replace the caller's alert preference.
    async fn upsert(
        &self,
        subject_id: &SubjectId,
        update: AlertPreferenceUpdate,
    ) -> Result<AlertPreference, Error>;
}

/// Fixture command echoing the update with a fresh timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertPreferencesCommand;

#[async_trait]
impl AlertPreferencesCommand for FixtureAlertPreferencesCommand {
    async fn upsert(
        &self,
        _subject_id: &SubjectId,
        update: AlertPreferenceUpdate,
    ) -> Result<AlertPreference, Error> {
        Ok(AlertPreference {
            frequency: update.frequency(),
            keywords: update.keywords().to_owned(),
            channels: update.channels().to_owned(),
            updated_at: Some(Utc::now()),
        })
    }
}
