//! Driving port for turning a verified claim into a local user.
//!
//! The inbound identity stage calls this after verification and hands the
//! returned [`LocalUser`] to every downstream handler explicitly.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, IdentityClaim, LocalUser};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityReconciliation: Send + Sync {
    /// Ensure a local user exists and mirrors `claim`.
    async fn reconcile(&self, claim: IdentityClaim) -> Result<LocalUser, Error>;
}

/// Fixture reconciler that projects the claim without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityReconciliation;

#[async_trait]
impl IdentityReconciliation for FixtureIdentityReconciliation {
    async fn reconcile(&self, claim: IdentityClaim) -> Result<LocalUser, Error> {
        Ok(LocalUser {
            subject_id: claim.subject_id,
            email: claim.email,
            display_name: claim.display_name,
            avatar_url: claim.avatar_url,
            created_at: Utc::now(),
        })
    }
}
