//! Alert preference service.
//!
//! Reads never create rows: a user without a stored preference sees the
//! weekly default with no `updated_at`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AlertPreferenceRepository, AlertPreferenceRepositoryError, AlertPreferencesCommand,
    AlertPreferencesQuery,
};
use crate::domain::{AlertPreference, AlertPreferenceUpdate, Error, SubjectId};

#[derive(Clone)]
pub struct AlertsService<R> {
    repo: Arc<R>,
}

impl<R> AlertsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_alerts_error(error: AlertPreferenceRepositoryError) -> Error {
    match error {
        AlertPreferenceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("alert repository unavailable: {message}"))
        }
        AlertPreferenceRepositoryError::Query { message } => {
            Error::internal(format!("alert repository error: {message}"))
        }
        AlertPreferenceRepositoryError::UnknownUser { .. } => Error::not_found("user not found"),
    }
}

#[async_trait]
impl<R> AlertPreferencesQuery for AlertsService<R>
where
    R: AlertPreferenceRepository,
{
    async fn get(&self, subject_id: &SubjectId) -> Result<AlertPreference, Error> {
        Ok(self
            .repo
            .find(subject_id)
            .await
            .map_err(map_alerts_error)?
            .unwrap_or_default())
    }
}

#[async_trait]
impl<R> AlertPreferencesCommand for AlertsService<R>
where
    R: AlertPreferenceRepository,
{
    async fn upsert(
        &self,
        subject_id: &SubjectId,
        update: AlertPreferenceUpdate,
    ) -> Result<AlertPreference, Error> {
        self.repo
            .upsert(subject_id, &update)
            .await
            .map_err(map_alerts_error)
    }
}
