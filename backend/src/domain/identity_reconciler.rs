//! Identity reconciliation service.
//!
//! Turns a verified [`IdentityClaim`] into the caller's [`LocalUser`],
//! creating the row on first sight and refreshing cached attributes when the
//! identity provider reports new values. The repository performs each attempt
//! inside a single transaction; this service retries exactly once when a
//! concurrent request wins the race to create the same subject.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    IdentityReconciliation, IdentityVerificationError, Reconciliation, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, IdentityClaim, LocalUser};

/// Reconciler implementing [`IdentityReconciliation`] over a user repository.
#[derive(Clone)]
pub struct IdentityReconciler<R> {
    users: Arc<R>,
}

impl<R> IdentityReconciler<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateSubject { subject_id } => {
            Error::internal(format!("user {subject_id} could not be reconciled"))
        }
    }
}

impl From<IdentityVerificationError> for Error {
    fn from(error: IdentityVerificationError) -> Self {
        match error {
            IdentityVerificationError::InvalidToken { .. } => Error::unauthorized("Invalid token"),
            IdentityVerificationError::NotConfigured => {
                Error::service_unavailable("identity verification is not configured")
            }
            IdentityVerificationError::Timeout { message } => {
                Error::upstream_timeout(format!("identity provider timed out: {message}"))
            }
            IdentityVerificationError::Unavailable { message } => {
                Error::upstream(format!("identity provider unavailable: {message}"))
            }
        }
    }
}

impl<R> IdentityReconciler<R>
where
    R: UserRepository,
{
    async fn attempt(&self, claim: &IdentityClaim) -> Result<Reconciliation, UserPersistenceError> {
        match self.users.reconcile(claim).await {
            Err(UserPersistenceError::DuplicateSubject { subject_id }) => {
                warn!(%subject_id, "concurrent user creation detected; retrying reconciliation");
                self.users.reconcile(claim).await
            }
            other => other,
        }
    }
}

#[async_trait]
impl<R> IdentityReconciliation for IdentityReconciler<R>
where
    R: UserRepository,
{
    async fn reconcile(&self, claim: IdentityClaim) -> Result<LocalUser, Error> {
        let outcome = self
            .attempt(&claim)
            .await
            .map_err(map_user_persistence_error)?;
        if let Reconciliation::Created(user) = &outcome {
            info!(subject_id = %user.subject_id, "created local user");
        }
        Ok(outcome.into_user())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, SubjectId};
    use chrono::Utc;
    use mockall::Sequence;
    use rstest::{fixture, rstest};

    #[fixture]
    fn claim() -> IdentityClaim {
        IdentityClaim {
            subject_id: SubjectId::new("uid-1").expect("subject"),
            email: Some("ada@example.com".to_owned()),
            display_name: Some("Ada".to_owned()),
            avatar_url: None,
        }
    }

    fn user_from(claim: &IdentityClaim) -> LocalUser {
        LocalUser {
            subject_id: claim.subject_id.clone(),
            email: claim.email.clone(),
            display_name: claim.display_name.clone(),
            avatar_url: claim.avatar_url.clone(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn returns_created_user(claim: IdentityClaim) {
        let user = user_from(&claim);
        let mut repo = MockUserRepository::new();
        let created = user.clone();
        repo.expect_reconcile()
            .times(1)
            .return_once(move |_| Ok(Reconciliation::Created(created)));

        let reconciler = IdentityReconciler::new(Arc::new(repo));
        let resolved = reconciler.reconcile(claim).await.expect("reconciled");

        assert_eq!(resolved, user);
    }

    #[rstest]
    #[tokio::test]
    async fn retries_once_after_losing_creation_race(claim: IdentityClaim) {
        let user = user_from(&claim);
        let mut seq = Sequence::new();
        let mut repo = MockUserRepository::new();
        repo.expect_reconcile()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|claim| {
                Err(UserPersistenceError::duplicate_subject(
                    claim.subject_id.as_ref(),
                ))
            });
        let existing = user.clone();
        repo.expect_reconcile()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(move |_| Ok(Reconciliation::Unchanged(existing)));

        let reconciler = IdentityReconciler::new(Arc::new(repo));
        let resolved = reconciler.reconcile(claim).await.expect("retry succeeds");

        assert_eq!(resolved.subject_id, user.subject_id);
    }

    #[rstest]
    #[tokio::test]
    async fn gives_up_after_second_duplicate(claim: IdentityClaim) {
        let mut repo = MockUserRepository::new();
        repo.expect_reconcile()
            .times(2)
            .returning(|claim| {
                Err(UserPersistenceError::duplicate_subject(
                    claim.subject_id.as_ref(),
                ))
            });

        let reconciler = IdentityReconciler::new(Arc::new(repo));
        let error = reconciler.reconcile(claim).await.expect_err("fails");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn maps_persistence_errors(
        claim: IdentityClaim,
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_reconcile()
            .times(1)
            .return_once(move |_| Err(failure));

        let reconciler = IdentityReconciler::new(Arc::new(repo));
        let error = reconciler.reconcile(claim).await.expect_err("fails");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[case(IdentityVerificationError::invalid_token("bad signature"), ErrorCode::Unauthorized)]
    #[case(IdentityVerificationError::not_configured(), ErrorCode::ServiceUnavailable)]
    #[case(IdentityVerificationError::timeout("jwks"), ErrorCode::UpstreamTimeout)]
    #[case(IdentityVerificationError::unavailable("jwks 500"), ErrorCode::UpstreamError)]
    fn verification_errors_map_to_domain_codes(
        #[case] failure: IdentityVerificationError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(Error::from(failure).code(), expected);
    }

    #[rstest]
    fn invalid_token_message_hides_verifier_detail() {
        let error = Error::from(IdentityVerificationError::invalid_token("kid mismatch"));
        assert_eq!(error.message(), "Invalid token");
    }
}
