//! Profile service: read and edit the caller's cached identity attributes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::identity_reconciler::map_user_persistence_error;
use crate::domain::ports::{UserProfileCommand, UserProfileQuery, UserRepository};
use crate::domain::{Error, LocalUser, ProfileUpdate, SubjectId};

/// Service implementing both profile driving ports.
#[derive(Clone)]
pub struct ProfileService<R> {
    users: Arc<R>,
}

impl<R> ProfileService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

#[async_trait]
impl<R> UserProfileQuery for ProfileService<R>
where
    R: UserRepository,
{
    async fn fetch_profile(&self, subject_id: &SubjectId) -> Result<LocalUser, Error> {
        self.users
            .find_by_subject(subject_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(user_not_found)
    }
}

#[async_trait]
impl<R> UserProfileCommand for ProfileService<R>
where
    R: UserRepository,
{
    async fn update_profile(
        &self,
        subject_id: &SubjectId,
        update: ProfileUpdate,
    ) -> Result<(), Error> {
        let updated = self
            .users
            .update_profile(subject_id, &update)
            .await
            .map_err(map_user_persistence_error)?;
        if updated { Ok(()) } else { Err(user_not_found()) }
    }
}
