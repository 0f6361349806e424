//! Port abstraction for bearer-token verification.
//!
//! Adapters turn an opaque credential into an [`IdentityClaim`]. They are
//! stateless per call apart from key caches.

use async_trait::async_trait;

use crate::domain::{BearerToken, IdentityClaim, SubjectId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity verification adapters.
    pub enum IdentityVerificationError {
        /// The credential is malformed, expired, or fails signature checks.
        InvalidToken { message: String } => "invalid token: {message}",
        /// No verifier is configured for this deployment.
        NotConfigured => "identity verification is not configured",
        /// The identity provider's key endpoint did not answer in time.
        Timeout { message: String } => "identity provider timed out: {message}",
        /// The identity provider could not be reached or answered garbage.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify `token` and return the identity it asserts.
    async fn verify(&self, token: &BearerToken) -> Result<IdentityClaim, IdentityVerificationError>;
}

/// Prefix accepted by [`FixtureIdentityVerifier`].
pub const FIXTURE_TOKEN_PREFIX: &str = "fixture-";

/// Fixture verifier for tests and local runs without an identity provider.
///
/// Accepts tokens shaped `fixture-<subject>` and derives a deterministic
/// claim from the subject.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityVerifier;

#[async_trait]
impl IdentityVerifier for FixtureIdentityVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<IdentityClaim, IdentityVerificationError> {
        let subject = token
            .expose()
            .strip_prefix(FIXTURE_TOKEN_PREFIX)
            .ok_or_else(|| IdentityVerificationError::invalid_token("unrecognised fixture token"))?;
        let subject_id = SubjectId::new(subject)
            .map_err(|err| IdentityVerificationError::invalid_token(err.to_string()))?;
        Ok(IdentityClaim {
            email: Some(format!("{subject_id}@example.com")),
            display_name: Some(subject_id.to_string()),
            avatar_url: None,
            subject_id,
        })
    }
}
