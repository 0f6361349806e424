//! Port abstraction for alert preference persistence.

use async_trait::async_trait;

use crate::domain::{AlertPreference, AlertPreferenceUpdate, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by alert preference repository adapters.
    pub enum AlertPreferenceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "alert preference repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "alert preference repository query failed: {message}",
        /// The owning user row does not exist.
        UnknownUser { subject_id: String } => "user {subject_id} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertPreferenceRepository: Send + Sync {
    /// Fetch the stored preference, if any.
    async fn find(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<AlertPreference>, AlertPreferenceRepositoryError>;

    /// Create or replace the single preference row for `subject_id`,
    /// bumping `updated_at`.
    async fn upsert(
        &self,
        subject_id: &SubjectId,
        update: &AlertPreferenceUpdate,
    ) -> Result<AlertPreference, AlertPreferenceRepositoryError>;
}
