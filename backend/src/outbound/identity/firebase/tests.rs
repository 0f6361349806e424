//! Tests for the Firebase ID-token verifier.

use std::sync::Mutex;

use chrono::Local;
use jsonwebtoken::{EncodingKey, Header, encode};
use reqwest::header::HeaderValue;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;

const PROJECT: &str = "marquee-test";
const KID: &str = "test-key-1";
const SIGNING_KEY: &[u8] = include_bytes!("../testdata/rsa_test_key.pem");
const JWKS: &str = include_str!("../testdata/jwks.json");
// Nothing listens on the discard port, so refreshes fail fast.
const UNREACHABLE_JWKS: &str = "http://127.0.0.1:9/jwks";

struct StepClock(Mutex<DateTime<Utc>>);

impl StepClock {
    fn advance(&self, delta: TimeDelta) {
        let mut now = self.0.lock().unwrap_or_else(|err| err.into_inner());
        *now += delta;
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(|err| err.into_inner())
    }
}

fn settings(project_id: Option<&str>) -> FirebaseSettings {
    FirebaseSettings {
        project_id: project_id.map(str::to_owned),
        jwks_url: Url::parse(UNREACHABLE_JWKS).expect("valid url"),
        timeout: Duration::from_secs(1),
    }
}

fn key_set() -> JwkSet {
    serde_json::from_str(JWKS).expect("test key set parses")
}

#[fixture]
fn clock() -> Arc<StepClock> {
    Arc::new(StepClock(Mutex::new(Utc::now())))
}

async fn seeded_verifier(clock: Arc<StepClock>) -> FirebaseIdentityVerifier {
    let verifier =
        FirebaseIdentityVerifier::new(settings(Some(PROJECT)), clock).expect("client builds");
    verifier.seed_keys(key_set(), TimeDelta::minutes(10)).await;
    verifier
}

fn claims(overrides: Value) -> Value {
    let now = Utc::now().timestamp();
    let mut base = json!({
        "iss": format!("{ISSUER_PREFIX}{PROJECT}"),
        "aud": PROJECT,
        "sub": "firebase-uid-1",
        "iat": now,
        "exp": now + 600,
        "email": "ada@example.com",
        "name": "Ada Lovelace",
        "picture": "https://example.com/ada.png",
    });
    if let (Some(target), Some(patch)) = (base.as_object_mut(), overrides.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    base
}

fn sign(claims: &Value, kid: Option<&str>) -> BearerToken {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_owned);
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY).expect("test key loads");
    let jwt = encode(&header, claims, &key).expect("token signs");
    BearerToken::from_authorization_header(Some(&format!("Bearer {jwt}"))).expect("bearer")
}

#[rstest]
#[tokio::test]
async fn accepts_valid_token_and_maps_claims(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;

    let claim = verifier
        .verify(&sign(&claims(json!({})), Some(KID)))
        .await
        .expect("token verifies");

    assert_eq!(claim.subject_id.as_ref(), "firebase-uid-1");
    assert_eq!(claim.email.as_deref(), Some("ada@example.com"));
    assert_eq!(claim.display_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(claim.avatar_url.as_deref(), Some("https://example.com/ada.png"));
}

#[rstest]
#[tokio::test]
async fn blank_optional_claims_become_none(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;
    let token = sign(&claims(json!({ "email": "", "name": null })), Some(KID));

    let claim = verifier.verify(&token).await.expect("token verifies");

    assert!(claim.email.is_none());
    assert!(claim.display_name.is_none());
}

#[rstest]
#[case::wrong_audience(json!({ "aud": "someone-else" }))]
#[case::wrong_issuer(json!({ "iss": "https://securetoken.google.com/someone-else" }))]
#[case::expired(json!({ "exp": Utc::now().timestamp() - 3600 }))]
#[case::blank_subject(json!({ "sub": "   " }))]
#[tokio::test]
async fn rejects_tokens_failing_claim_checks(clock: Arc<StepClock>, #[case] overrides: Value) {
    let verifier = seeded_verifier(clock).await;

    let error = verifier
        .verify(&sign(&claims(overrides), Some(KID)))
        .await
        .expect_err("token rejected");

    assert!(matches!(error, IdentityVerificationError::InvalidToken { .. }));
}

#[rstest]
#[tokio::test]
async fn rejects_token_without_key_id(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;

    let error = verifier
        .verify(&sign(&claims(json!({})), None))
        .await
        .expect_err("token rejected");

    assert!(matches!(error, IdentityVerificationError::InvalidToken { .. }));
}

#[rstest]
#[tokio::test]
async fn rejects_symmetric_tokens(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KID.to_owned());
    let jwt = encode(
        &header,
        &claims(json!({})),
        &EncodingKey::from_secret(b"shared"),
    )
    .expect("token signs");
    let token = BearerToken::from_authorization_header(Some(&format!("Bearer {jwt}")))
        .expect("bearer");

    let error = verifier.verify(&token).await.expect_err("token rejected");

    assert!(matches!(error, IdentityVerificationError::InvalidToken { .. }));
}

#[rstest]
#[tokio::test]
async fn rejects_garbage(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;
    let token = BearerToken::from_authorization_header(Some("Bearer not-a-jwt")).expect("bearer");

    let error = verifier.verify(&token).await.expect_err("token rejected");

    assert!(matches!(error, IdentityVerificationError::InvalidToken { .. }));
}

#[rstest]
#[tokio::test]
async fn unknown_key_id_forces_refresh(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;

    let error = verifier
        .verify(&sign(&claims(json!({})), Some("rotated-key")))
        .await
        .expect_err("refresh fails");

    assert!(matches!(error, IdentityVerificationError::Unavailable { .. }));
}

#[rstest]
#[tokio::test]
async fn unknown_key_ids_are_throttled_between_refreshes(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(Arc::clone(&clock)).await;
    let first = verifier
        .verify(&sign(&claims(json!({})), Some("rotated-key")))
        .await
        .expect_err("refresh fails");
    assert!(matches!(first, IdentityVerificationError::Unavailable { .. }));

    // Inside the window the cached set answers; the endpoint is not contacted.
    clock.advance(TimeDelta::seconds(MIN_FORCED_REFRESH_SECS - 1));
    let second = verifier
        .verify(&sign(&claims(json!({})), Some("another-key")))
        .await
        .expect_err("unknown key rejected");
    assert!(matches!(second, IdentityVerificationError::InvalidToken { .. }));

    let known = verifier
        .verify(&sign(&claims(json!({})), Some(KID)))
        .await
        .expect("cached key still verifies");
    assert_eq!(known.subject_id.as_ref(), "firebase-uid-1");

    clock.advance(TimeDelta::seconds(1));
    let third = verifier
        .verify(&sign(&claims(json!({})), Some("another-key")))
        .await
        .expect_err("refresh fails");
    assert!(matches!(third, IdentityVerificationError::Unavailable { .. }));
}

#[rstest]
#[tokio::test]
async fn concurrent_unknown_key_ids_share_one_refresh(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(clock).await;
    let first = sign(&claims(json!({})), Some("rotated-a"));
    let second = sign(&claims(json!({})), Some("rotated-b"));

    let (a, b) = tokio::join!(verifier.verify(&first), verifier.verify(&second));

    let unavailable = [&a, &b]
        .iter()
        .filter(|result| matches!(result, Err(IdentityVerificationError::Unavailable { .. })))
        .count();
    let rejected = [&a, &b]
        .iter()
        .filter(|result| matches!(result, Err(IdentityVerificationError::InvalidToken { .. })))
        .count();
    assert_eq!((unavailable, rejected), (1, 1));
}

#[rstest]
#[tokio::test]
async fn expired_key_cache_is_refreshed(clock: Arc<StepClock>) {
    let verifier = seeded_verifier(Arc::clone(&clock)).await;
    clock.advance(TimeDelta::minutes(11));

    let error = verifier
        .verify(&sign(&claims(json!({})), Some(KID)))
        .await
        .expect_err("refresh fails");

    assert!(matches!(error, IdentityVerificationError::Unavailable { .. }));
}

#[rstest]
#[tokio::test]
async fn missing_project_is_not_configured(clock: Arc<StepClock>) {
    let verifier = FirebaseIdentityVerifier::new(settings(None), clock).expect("client builds");
    assert!(!verifier.is_configured());

    let error = verifier
        .verify(&sign(&claims(json!({})), Some(KID)))
        .await
        .expect_err("not configured");

    assert_eq!(error, IdentityVerificationError::NotConfigured);
}

#[rstest]
#[case("public, max-age=19302, must-revalidate, no-transform", Some(19302))]
#[case("max-age=60", Some(60))]
#[case("no-cache", None)]
#[case("max-age=0", None)]
#[case("max-age=soon", None)]
fn parses_cache_control_max_age(#[case] raw: &str, #[case] expected: Option<i64>) {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_str(raw).expect("header"));
    assert_eq!(max_age(&headers), expected);
}
