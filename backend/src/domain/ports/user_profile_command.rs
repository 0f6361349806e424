//! Driving port for explicit profile edits.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, SubjectId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileCommand: Send + Sync {
    /// Apply `update` to the caller's profile.
    async fn update_profile(&self, subject_id: &SubjectId, update: ProfileUpdate)
    -> Result<(), Error>;
}

/// Fixture command that accepts every edit.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserProfileCommand;

#[async_trait]
impl UserProfileCommand for FixtureUserProfileCommand {
    async fn update_profile(
        &self,
        _subject_id: &SubjectId,
        _update: ProfileUpdate,
    ) -> Result<(), Error> {
        Ok(())
    }
}
