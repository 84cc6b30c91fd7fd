//! Single and bulk repositioning against mocked repositories.

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::OwnershipResolver;
use crate::domain::ports::{MockAuditRecorder, MockResourceMetrics};
use crate::domain::test_helpers::{
    MockStores, OWNER, STRANGER, category, content, portfolio, section, sinks_with,
    sinks_with_metrics,
};

fn manager(mocks: MockStores, sinks: Sinks) -> PositionManager {
    let stores = mocks.into_stores();
    let gate = AuthorizationGate::new(OwnershipResolver::new(stores.clone()), sinks.clone());
    PositionManager::new(stores, gate, sinks)
}

fn silent_audit() -> MockAuditRecorder {
    let mut audit = MockAuditRecorder::new();
    audit.expect_record().times(0);
    audit
}

#[rstest]
#[case(Vec::new())]
#[case(vec![PositionUpdate::new(CategoryId::new(1), 0), PositionUpdate::new(CategoryId::new(1), 1)])]
#[case(vec![PositionUpdate::new(CategoryId::new(0), 0)])]
#[tokio::test]
async fn malformed_requests_fail_before_any_read(#[case] items: Vec<PositionUpdate<CategoryId>>) {
    let mut mocks = MockStores::default();
    mocks.categories.expect_find_by_ids().times(0);
    mocks.categories.expect_bulk_update_positions().times(0);

    let err = manager(mocks, sinks_with(silent_audit()))
        .bulk_update_positions::<Category>(&items, OWNER)
        .await
        .expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[rstest]
#[tokio::test]
async fn a_missing_id_aborts_without_writing() {
    let mut mocks = MockStores::default();
    mocks
        .categories
        .expect_find_by_ids()
        .times(1)
        .return_once(|_| Ok(vec![category(1, 10, OWNER, 0)]));
    mocks.categories.expect_bulk_update_positions().times(0);
    mocks.portfolios.expect_find_by_id().times(0);

    let items = [
        PositionUpdate::new(CategoryId::new(1), 1),
        PositionUpdate::new(CategoryId::new(99), 0),
    ];
    let err = manager(mocks, sinks_with(silent_audit()))
        .bulk_update_positions::<Category>(&items, OWNER)
        .await
        .expect_err("missing id");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.details().map(|details| details["missing"].clone()),
        Some(serde_json::json!([99]))
    );
}

#[rstest]
#[tokio::test]
async fn one_foreign_parent_aborts_the_whole_batch() {
    let mut mocks = MockStores::default();
    mocks.sections.expect_find_by_ids().return_once(|_| {
        Ok(vec![
            section(1, 10, OWNER, 0),
            section(2, 10, OWNER, 1),
            section(3, 20, OWNER, 0),
        ])
    });
    mocks
        .portfolios
        .expect_find_by_id()
        .with(eq(PortfolioId::new(10)))
        .times(1)
        .return_once(|_| Ok(Some(portfolio(10, OWNER))));
    mocks
        .portfolios
        .expect_find_by_id()
        .with(eq(PortfolioId::new(20)))
        .times(1)
        .return_once(|_| Ok(Some(portfolio(20, STRANGER))));
    mocks.sections.expect_bulk_update_positions().times(0);
    let mut audit = MockAuditRecorder::new();
    audit
        .expect_record()
        .withf(|event| event.action == AuditAction::Access { allowed: false })
        .times(1)
        .return_once(|_| Ok(()));

    let items = [
        PositionUpdate::new(SectionId::new(1), 2),
        PositionUpdate::new(SectionId::new(2), 1),
        PositionUpdate::new(SectionId::new(3), 0),
    ];
    let err = manager(mocks, sinks_with(audit))
        .bulk_update_positions::<Section>(&items, OWNER)
        .await
        .expect_err("foreign parent");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn owned_batches_are_written_once_and_audited_in_aggregate() {
    let mut mocks = MockStores::default();
    mocks
        .section_contents
        .expect_find_by_ids()
        .return_once(|_| Ok(vec![content(1, 5, OWNER, 0), content(2, 5, OWNER, 1)]));
    mocks
        .sections
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(section(5, 10, OWNER, 0))));
    mocks
        .portfolios
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(portfolio(10, OWNER))));
    mocks
        .section_contents
        .expect_bulk_update_orders()
        .withf(|updates| updates.len() == 2 && updates[0].position == 1)
        .times(1)
        .return_once(|_| Ok(()));
    let mut audit = MockAuditRecorder::new();
    audit
        .expect_record()
        .withf(|event| {
            event.action == AuditAction::BulkReorder { count: 2 }
                && event.resource_id.is_none()
                && event.actor == OWNER
        })
        .times(1)
        .return_once(|_| Ok(()));
    let mut metrics = MockResourceMetrics::new();
    metrics
        .expect_record_mutation()
        .with(eq(crate::domain::EntityKind::SectionContent), eq(Mutation::Reordered))
        .times(1)
        .return_once(|_, _| Ok(()));

    let items = [
        PositionUpdate::new(SectionContentId::new(1), 1),
        PositionUpdate::new(SectionContentId::new(2), 0),
    ];
    manager(mocks, sinks_with_metrics(audit, metrics))
        .bulk_update_positions::<SectionContent>(&items, OWNER)
        .await
        .expect("reordered");
}

#[rstest]
#[tokio::test]
async fn storage_rollback_surfaces_as_internal() {
    let mut mocks = MockStores::default();
    mocks
        .categories
        .expect_find_by_ids()
        .return_once(|_| Ok(vec![category(1, 10, OWNER, 0)]));
    mocks
        .portfolios
        .expect_find_by_id()
        .return_once(|_| Ok(Some(portfolio(10, OWNER))));
    mocks
        .categories
        .expect_bulk_update_positions()
        .return_once(|_| Err(ResourceStoreError::query("deadlock detected")));

    let err = manager(mocks, sinks_with(silent_audit()))
        .bulk_update_positions::<Category>(&[PositionUpdate::new(CategoryId::new(1), 4)], OWNER)
        .await
        .expect_err("rolled back");

    assert_eq!(err.code(), ErrorCode::Internal);
}

#[rstest]
#[tokio::test]
async fn single_moves_touch_only_the_target() {
    let mut mocks = MockStores::default();
    mocks
        .categories
        .expect_find_by_id()
        .return_once(|_| Ok(Some(category(1, 10, OWNER, 0))));
    mocks
        .portfolios
        .expect_find_by_id()
        .return_once(|_| Ok(Some(portfolio(10, OWNER))));
    mocks
        .categories
        .expect_update_position()
        .with(eq(CategoryId::new(1)), eq(3_u32))
        .times(1)
        .return_once(|_, _| Ok(()));
    mocks.categories.expect_bulk_update_positions().times(0);
    let mut audit = MockAuditRecorder::new();
    audit
        .expect_record()
        .withf(|event| event.action == AuditAction::Update && event.resource_id == Some(1))
        .times(1)
        .return_once(|_| Ok(()));

    manager(mocks, sinks_with(audit))
        .update_position::<Category>(CategoryId::new(1), 3, OWNER)
        .await
        .expect("moved");
}
