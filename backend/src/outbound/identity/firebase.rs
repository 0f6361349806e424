//! Firebase ID-token verifier.
//!
//! Tokens are RS256 JWTs whose `kid` header names one of Google's rotating
//! signing keys. The key set is fetched from the configured JWKS endpoint and
//! cached until the response's `Cache-Control: max-age` elapses. A token
//! naming an unknown `kid` forces a refresh so rotations are picked up before
//! the cached set expires. Forced refreshes run one at a time and at most once
//! per [`MIN_FORCED_REFRESH_SECS`]; unknown keys inside that window are
//! rejected against the cached set.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use mockable::Clock;
use reqwest::header::{CACHE_CONTROL, HeaderMap};
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{BearerToken, IdentityClaim, SubjectId};

/// Google's public JWKS for Firebase Auth ID tokens.
pub const DEFAULT_FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_KEY_TTL_SECS: i64 = 3600;
/// Minimum spacing between refreshes triggered by an unknown `kid`.
pub const MIN_FORCED_REFRESH_SECS: i64 = 30;

/// Connection settings for [`FirebaseIdentityVerifier`].
#[derive(Debug, Clone)]
pub struct FirebaseSettings {
    /// Firebase project; `None` disables verification.
    pub project_id: Option<String>,
    pub jwks_url: Url,
    /// Bound on each key-set fetch.
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

struct CachedKeys {
    keys: JwkSet,
    expires_at: DateTime<Utc>,
}

enum CacheLookup {
    Hit(DecodingKey),
    UnknownKey,
    Stale,
}

pub struct FirebaseIdentityVerifier {
    client: Client,
    project_id: Option<String>,
    jwks_url: Url,
    clock: Arc<dyn Clock>,
    cache: RwLock<Option<CachedKeys>>,
    /// Held for the duration of a fetch; records when the last one started.
    last_refresh: Mutex<Option<DateTime<Utc>>>,
}

impl FirebaseIdentityVerifier {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: FirebaseSettings, clock: Arc<dyn Clock>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        let project_id = settings
            .project_id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty());
        Ok(Self {
            client,
            project_id,
            jwks_url: settings.jwks_url,
            clock,
            cache: RwLock::new(None),
            last_refresh: Mutex::new(None),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.project_id.is_some()
    }

    async fn cached_key(&self, kid: &str) -> CacheLookup {
        let cache = self.cache.read().await;
        match cache.as_ref() {
            Some(cached) if cached.expires_at > self.clock.utc() => cached
                .keys
                .find(kid)
                .and_then(|jwk| DecodingKey::from_jwk(jwk).ok())
                .map_or(CacheLookup::UnknownKey, CacheLookup::Hit),
            _ => CacheLookup::Stale,
        }
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, IdentityVerificationError> {
        if let CacheLookup::Hit(key) = self.cached_key(kid).await {
            return Ok(key);
        }

        let mut last_refresh = self.last_refresh.lock().await;
        let now = self.clock.utc();
        // Another request may have refreshed while this one waited.
        match self.cached_key(kid).await {
            CacheLookup::Hit(key) => return Ok(key),
            CacheLookup::UnknownKey
                if last_refresh
                    .is_some_and(|at| now - at < TimeDelta::seconds(MIN_FORCED_REFRESH_SECS)) =>
            {
                return Err(reject(format!("unknown key id {kid}")));
            }
            CacheLookup::UnknownKey | CacheLookup::Stale => {}
        }

        *last_refresh = Some(now);
        let refreshed = self.fetch_keys().await?;
        let key = refreshed
            .keys
            .find(kid)
            .map(DecodingKey::from_jwk)
            .transpose()
            .map_err(|err| IdentityVerificationError::unavailable(format!("unusable key: {err}")))?;
        *self.cache.write().await = Some(refreshed);
        key.ok_or_else(|| reject(format!("unknown key id {kid}")))
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, IdentityVerificationError> {
        debug!(url = %self.jwks_url, "fetching identity provider signing keys");
        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityVerificationError::unavailable(format!(
                "key endpoint returned {}",
                status.as_u16()
            )));
        }

        let ttl = max_age(response.headers()).unwrap_or(DEFAULT_KEY_TTL_SECS);
        let keys: JwkSet = response
            .json()
            .await
            .map_err(|err| IdentityVerificationError::unavailable(format!("invalid key set: {err}")))?;
        Ok(CachedKeys {
            keys,
            expires_at: self.clock.utc() + TimeDelta::seconds(ttl),
        })
    }

    #[cfg(test)]
    async fn seed_keys(&self, keys: JwkSet, ttl: TimeDelta) {
        *self.cache.write().await = Some(CachedKeys {
            keys,
            expires_at: self.clock.utc() + ttl,
        });
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<IdentityClaim, IdentityVerificationError> {
        let project_id = self
            .project_id
            .as_deref()
            .ok_or_else(IdentityVerificationError::not_configured)?;

        let header = decode_header(token.expose()).map_err(reject)?;
        if header.alg != Algorithm::RS256 {
            return Err(reject(format!("unexpected algorithm {:?}", header.alg)));
        }
        let kid = header.kid.ok_or_else(|| reject("missing key id"))?;
        let key = self.decoding_key(&kid).await?;

        let claims = decode::<FirebaseClaims>(token.expose(), &key, &validation(project_id))
            .map_err(reject)?
            .claims;
        let subject_id = SubjectId::new(claims.sub).map_err(reject)?;

        Ok(IdentityClaim {
            subject_id,
            email: non_empty(claims.email),
            display_name: non_empty(claims.name),
            avatar_url: non_empty(claims.picture),
        })
    }
}

fn validation(project_id: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[format!("{ISSUER_PREFIX}{project_id}")]);
    validation.set_audience(&[project_id]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation
}

fn reject(reason: impl ToString) -> IdentityVerificationError {
    let message = reason.to_string();
    warn!(reason = %message, "rejected identity token");
    IdentityVerificationError::invalid_token(message)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerificationError {
    if error.is_timeout() {
        IdentityVerificationError::timeout(error.to_string())
    } else {
        IdentityVerificationError::unavailable(error.to_string())
    }
}

/// Parse `max-age` seconds from a `Cache-Control` header.
fn max_age(headers: &HeaderMap) -> Option<i64> {
    headers
        .get_all(CACHE_CONTROL)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(|directive| {
            directive
                .trim()
                .strip_prefix("max-age=")
                .and_then(|secs| secs.trim().parse::<i64>().ok())
        })
        .filter(|secs| *secs > 0)
}

#[cfg(test)]
mod tests;
