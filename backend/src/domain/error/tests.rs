//! Tests for error construction, context wrapping and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn conflict() -> Error {
    Error::conflict("title already used")
}

#[rstest]
#[case(Error::invalid_input("x"), ErrorCode::InvalidInput)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::internal("x"), ErrorCode::Internal)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidInput, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn context_prefixes_message_and_keeps_code(conflict: Error) {
    let wrapped = conflict.context("create section").context("portfolio 3");
    assert_eq!(wrapped.code(), ErrorCode::Conflict);
    assert_eq!(
        wrapped.message(),
        "portfolio 3: create section: title already used"
    );
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_code_in_snake_case(conflict: Error) {
    let value = serde_json::to_value(conflict.with_details(json!({"title": "Intro"})))
        .expect("serialise error");
    assert_eq!(value["code"], json!("conflict"));
    assert_eq!(value["message"], json!("title already used"));
    assert_eq!(value["details"]["title"], json!("Intro"));
    assert!(value.get("traceId").is_none());
}

#[rstest]
fn deserialising_rejects_blank_messages() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({"code": "not_found", "message": " "}));
    assert!(result.is_err());
}

#[rstest]
#[case(ErrorCode::InvalidInput, "invalid_input")]
#[case(ErrorCode::Unauthorized, "unauthorized")]
fn code_labels_match_serde(#[case] code: ErrorCode, #[case] label: &str) {
    assert_eq!(code.as_str(), label);
    assert_eq!(serde_json::to_value(code).expect("serialise"), json!(label));
}
