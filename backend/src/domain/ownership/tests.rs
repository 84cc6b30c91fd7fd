//! Owner-chain resolution against mocked repositories.

use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::ResourceStoreError;
use crate::domain::test_helpers::{MockStores, OWNER, STRANGER, category, portfolio, project};
use crate::domain::{CategoryId, ProjectId, SectionContentId};

fn resolver(mocks: MockStores) -> OwnershipResolver {
    OwnershipResolver::new(mocks.into_stores())
}

#[rstest]
#[tokio::test]
async fn portfolio_owner_is_read_from_the_record() {
    let mut mocks = MockStores::default();
    mocks
        .portfolios
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(portfolio(1, OWNER))));

    let resolved = resolver(mocks)
        .resolve(PortfolioId::new(1).into())
        .await
        .expect("resolved");

    assert_eq!(resolved.owner, OWNER);
    assert_eq!(resolved.portfolio, PortfolioId::new(1));
    assert!(resolved.drift.is_empty());
}

#[rstest]
#[tokio::test]
async fn second_level_children_resolve_to_portfolio_owner_despite_stale_copies() {
    let mut mocks = MockStores::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(project(30, 20, STRANGER))));
    mocks
        .categories
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(category(20, 10, OWNER, 0))));
    mocks
        .portfolios
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(portfolio(10, OWNER))));

    let resolved = resolver(mocks)
        .resolve(ProjectId::new(30).into())
        .await
        .expect("resolved");

    assert_eq!(resolved.owner, OWNER);
    assert_eq!(
        resolved.drift,
        vec![OwnerDrift {
            resource: ResourceRef::Project(ProjectId::new(30)),
            recorded_owner: STRANGER,
        }]
    );
}

#[rstest]
#[tokio::test]
async fn missing_ancestor_is_not_found_for_the_requested_resource() {
    let mut mocks = MockStores::default();
    mocks
        .projects
        .expect_find_by_id()
        .return_once(|_| Ok(Some(project(30, 20, OWNER))));
    mocks
        .categories
        .expect_find_by_id()
        .return_once(|_| Ok(None));
    mocks.portfolios.expect_find_by_id().times(0);

    let err = resolver(mocks)
        .resolve(ProjectId::new(30).into())
        .await
        .expect_err("category gone");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "project 30 not found");
    assert_eq!(
        err.details().and_then(|d| d["missingAncestor"]["entity"].as_str()),
        Some("category")
    );
}

#[rstest]
#[tokio::test]
async fn missing_resource_itself_is_not_found() {
    let mut mocks = MockStores::default();
    mocks
        .section_contents
        .expect_find_by_id()
        .return_once(|_| Ok(None));

    let err = resolver(mocks)
        .resolve(SectionContentId::new(5).into())
        .await
        .expect_err("absent");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert!(err.details().is_none());
}

#[rstest]
#[tokio::test]
async fn storage_failures_are_internal() {
    let mut mocks = MockStores::default();
    mocks
        .categories
        .expect_find_by_id()
        .return_once(|_| Err(ResourceStoreError::connection("pool exhausted")));

    let err = resolver(mocks)
        .resolve(CategoryId::new(2).into())
        .await
        .expect_err("store down");

    assert_eq!(err.code(), ErrorCode::Internal);
    assert!(err.message().starts_with("resolve owner of category"));
}
