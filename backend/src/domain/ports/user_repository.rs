//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{IdentityClaim, LocalUser, ProfileUpdate, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A concurrent writer created the same subject first.
        DuplicateSubject { subject_id: String } => "user {subject_id} already exists",
    }
}

/// Result of reconciling a claim against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No row existed; one was inserted from the claim.
    Created(LocalUser),
    /// The row existed and at least one cached field was rewritten.
    Updated(LocalUser),
    /// The row already matched the claim; nothing was written.
    Unchanged(LocalUser),
}

impl Reconciliation {
    pub fn into_user(self) -> LocalUser {
        match self {
            Self::Created(user) | Self::Updated(user) | Self::Unchanged(user) => user,
        }
    }

    /// Whether storage was written.
    pub fn wrote(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create or patch the user described by `claim` inside one transaction.
    ///
    /// Implementations return [`UserPersistenceError::DuplicateSubject`] when
    /// their insert loses a race against a concurrent creator.
    async fn reconcile(&self, claim: &IdentityClaim) -> Result<Reconciliation, UserPersistenceError>;

    /// Fetch a user by subject.
    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<LocalUser>, UserPersistenceError>;

    /// Apply caller-supplied profile edits. Returns `false` when no row exists.
    async fn update_profile(
        &self,
        subject_id: &SubjectId,
        update: &ProfileUpdate,
    ) -> Result<bool, UserPersistenceError>;
}
