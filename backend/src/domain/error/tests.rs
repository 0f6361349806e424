//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no token"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::upstream("TMDb error"), ErrorCode::UpstreamError)]
#[case(Error::upstream_timeout("slow"), ErrorCode::UpstreamTimeout)]
#[case(Error::service_unavailable("TMDB_API_KEY missing"), ErrorCode::ServiceUnavailable)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("invalid_request", Some(ErrorCode::InvalidRequest))]
#[case("service_unavailable", Some(ErrorCode::ServiceUnavailable))]
#[case("forbidden", None)]
#[case("conflict", None)]
fn error_codes_cover_only_emitted_categories(
    #[case] wire: &str,
    #[case] expected: Option<ErrorCode>,
) {
    let parsed = serde_json::from_value::<ErrorCode>(json!(wire)).ok();
    assert_eq!(parsed, expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({"code": "not_found", "message": "missing"});

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("payload deserialises")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_envelope(expected_trace_id: String) {
    let error = Error::upstream("TMDb error")
        .with_details(json!({"upstream_status": 404}))
        .with_trace_id(expected_trace_id.clone());

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "upstream_error",
            "message": "TMDb error",
            "details": {"upstream_status": 404},
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let result = serde_json::from_value::<Error>(json!({"code": "not_found", "message": " "}));
    assert!(result.is_err());
}
