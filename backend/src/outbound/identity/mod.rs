//! Identity provider outbound adapters.
//!
//! Provides the Firebase ID-token implementation of the `IdentityVerifier`
//! port.

mod firebase;

pub use firebase::{DEFAULT_FIREBASE_JWKS_URL, FirebaseIdentityVerifier, FirebaseSettings};
