//! Access decisions and their audit trail.

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{AuditAction, MockAuditRecorder};
use crate::domain::test_helpers::{
    MockStores, OWNER, STRANGER, category, portfolio, section, sinks_with,
};
use crate::domain::{CategoryId, PortfolioId, SectionId};

fn gate(mocks: MockStores, audit: MockAuditRecorder) -> AuthorizationGate {
    AuthorizationGate::new(OwnershipResolver::new(mocks.into_stores()), sinks_with(audit))
}

fn owned_category() -> MockStores {
    let mut mocks = MockStores::default();
    mocks
        .categories
        .expect_find_by_id()
        .return_once(|_| Ok(Some(category(7, 3, OWNER, 0))));
    mocks
        .portfolios
        .expect_find_by_id()
        .return_once(|_| Ok(Some(portfolio(3, OWNER))));
    mocks
}

#[rstest]
#[tokio::test]
async fn owner_passes_writes_without_an_access_event() {
    let mut audit = MockAuditRecorder::new();
    audit.expect_record().times(0);

    let resolved = gate(owned_category(), audit)
        .authorize(OWNER, CategoryId::new(7))
        .await
        .expect("owner allowed");

    assert_eq!(resolved.portfolio, PortfolioId::new(3));
}

#[rstest]
#[tokio::test]
async fn owner_reads_emit_an_access_granted_event() {
    let mut audit = MockAuditRecorder::new();
    audit
        .expect_record()
        .withf(|event| {
            event.action == AuditAction::Access { allowed: true }
                && event.resource_id == Some(7)
                && event.actor == OWNER
        })
        .times(1)
        .return_once(|_| Ok(()));

    gate(owned_category(), audit)
        .authorize_read(OWNER, CategoryId::new(7))
        .await
        .expect("owner allowed");
}

#[rstest]
#[case(Access::Write)]
#[case(Access::Read)]
#[tokio::test]
async fn strangers_are_denied_with_exactly_one_event(#[case] access: Access) {
    let mut audit = MockAuditRecorder::new();
    audit
        .expect_record()
        .withf(|event| {
            event.action == AuditAction::Access { allowed: false }
                && event.entity == EntityKind::Category
                && event.actor == STRANGER
        })
        .times(1)
        .return_once(|_| Ok(()));
    let gate = gate(owned_category(), audit);

    let err = match access {
        Access::Write => gate.authorize(STRANGER, CategoryId::new(7)).await,
        Access::Read => gate.authorize_read(STRANGER, CategoryId::new(7)).await,
    }
    .expect_err("stranger denied");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn stale_owner_copies_do_not_grant_access() {
    let mut mocks = MockStores::default();
    mocks
        .sections
        .expect_find_by_id()
        .return_once(|_| Ok(Some(section(4, 3, STRANGER, 0))));
    mocks
        .portfolios
        .expect_find_by_id()
        .return_once(|_| Ok(Some(portfolio(3, OWNER))));
    let mut audit = MockAuditRecorder::new();
    audit.expect_record().times(1).return_once(|_| Ok(()));

    let err = gate(mocks, audit)
        .authorize(STRANGER, SectionId::new(4))
        .await
        .expect_err("copy is not authoritative");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn missing_resources_are_not_found_and_not_audited() {
    let mut mocks = MockStores::default();
    mocks
        .categories
        .expect_find_by_id()
        .return_once(|_| Ok(None));
    let mut audit = MockAuditRecorder::new();
    audit.expect_record().times(0);

    let err = gate(mocks, audit)
        .authorize(OWNER, CategoryId::new(7))
        .await
        .expect_err("gone");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn unset_caller_is_invalid_input_before_any_read() {
    let mut audit = MockAuditRecorder::new();
    audit.expect_record().times(0);

    let err = gate(MockStores::default(), audit)
        .authorize(UserId::new(0), CategoryId::new(7))
        .await
        .expect_err("unset caller");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[rstest]
#[tokio::test]
async fn users_may_only_access_themselves() {
    let mut audit = MockAuditRecorder::new();
    audit
        .expect_record()
        .withf(|event| {
            event.entity == EntityKind::User && event.action == AuditAction::Access { allowed: false }
        })
        .times(1)
        .return_once(|_| Ok(()));
    let gate = gate(MockStores::default(), audit);

    let err = gate
        .authorize_self(STRANGER, OWNER, Access::Write)
        .await
        .expect_err("other user");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    gate.authorize_self(OWNER, OWNER, Access::Write)
        .await
        .expect("self allowed");
}
