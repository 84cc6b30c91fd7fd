//! Behaviour-driven tests for ownership checks across a portfolio tree.
//!
//! Scenarios run against the in-memory store so they need no database.

use std::sync::Arc;

use folio_backend::domain::ports::{AuditAction, CreateCategoryRequest};
use folio_backend::domain::{Category, Portfolio, UserId};
use folio_backend::test_support::TestHarness;
use folio_backend::Error;
use pagination::PageRequest;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Runtime;

mod fixtures;

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

/// Wrapper for non-Clone types to enable storage in `Slot`.
#[derive(Clone)]
struct RuntimeHandle(Arc<Runtime>);

#[derive(Clone)]
struct HarnessHandle(Arc<TestHarness>);

#[derive(Default, ScenarioState)]
struct OwnershipWorld {
    runtime: Slot<RuntimeHandle>,
    harness: Slot<HarnessHandle>,
    portfolio: Slot<Portfolio>,
    last_result: Slot<Result<Category, Error>>,
}

impl OwnershipWorld {
    fn setup(&self) {
        let runtime = Runtime::new().expect("create runtime");
        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.harness.set(HarnessHandle(Arc::new(TestHarness::new())));
    }

    fn run<T>(&self, operation: impl AsyncFnOnce(&TestHarness) -> T) -> T {
        let runtime = self.runtime.get().expect("runtime");
        let harness = self.harness.get().expect("harness");
        runtime.0.block_on(operation(&harness.0))
    }

    fn user(&self, handle: &str) -> UserId {
        self.run(async |harness| fixtures::user(harness, handle).await)
    }

    fn portfolio(&self) -> Portfolio {
        self.portfolio.get().expect("portfolio should be seeded")
    }

    fn add_category(&self, handle: &str, title: &str) -> Result<Category, Error> {
        let caller = self.user(handle);
        let portfolio = self.portfolio();
        self.run(async |harness| {
            harness
                .services
                .categories
                .create(CreateCategoryRequest {
                    caller,
                    portfolio_id: portfolio.id,
                    title: title.to_owned(),
                    description: String::new(),
                    position: None,
                })
                .await
        })
    }

    fn last_result(&self) -> Result<Category, Error> {
        self.last_result.get().expect("a request should have run")
    }
}

#[fixture]
fn world() -> OwnershipWorld {
    OwnershipWorld::default()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("a portfolio \"{title}\" owned by \"{handle}\"")]
fn a_portfolio_owned_by(world: &OwnershipWorld, title: String, handle: String) {
    world.setup();
    let owner = world.user(&handle);
    let portfolio = world.run(async |harness| fixtures::portfolio(harness, owner, &title).await);
    world.portfolio.set(portfolio);
}

#[given("\"{handle}\" has added the category \"{title}\"")]
fn has_added_the_category(world: &OwnershipWorld, handle: String, title: String) {
    world
        .add_category(&handle, &title)
        .expect("seed category should be created");
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("\"{handle}\" adds the category \"{title}\"")]
fn adds_the_category(world: &OwnershipWorld, handle: String, title: String) {
    let result = world.add_category(&handle, &title);
    world.last_result.set(result);
}

#[when("\"{handle}\" deletes the portfolio")]
fn deletes_the_portfolio(world: &OwnershipWorld, handle: String) {
    let caller = world.user(&handle);
    let portfolio = world.portfolio();
    world
        .run(async |harness| harness.services.portfolios.delete(portfolio.id, caller).await)
        .expect("owner deletes the portfolio");
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the request succeeds")]
fn the_request_succeeds(world: &OwnershipWorld) {
    if let Err(err) = world.last_result() {
        panic!("expected success, got {err}");
    }
}

#[then("the request fails with \"{code}\"")]
fn the_request_fails_with(world: &OwnershipWorld, code: String) {
    match world.last_result() {
        Ok(category) => panic!("expected {code}, got category {}", category.id),
        Err(err) => assert_eq!(err.code().as_str(), code),
    }
}

#[then("a denied access is audited for \"{handle}\"")]
fn a_denied_access_is_audited(world: &OwnershipWorld, handle: String) {
    let actor = world.user(&handle);
    let harness = world.harness.get().expect("harness");
    let denials = harness
        .0
        .audit
        .events_with(AuditAction::Access { allowed: false });
    assert!(
        denials.iter().any(|event| event.actor == actor),
        "no denial recorded for {handle}"
    );
}

#[then("the category count is {count}")]
fn the_category_count_is(world: &OwnershipWorld, count: u64) {
    let portfolio = world.portfolio();
    let page = world
        .run(async |harness| {
            harness
                .services
                .category_queries
                .list(portfolio.id, PageRequest::default())
                .await
        })
        .expect("listing succeeds");
    assert_eq!(page.total, count);
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/portfolio_ownership.feature",
    name = "Owner adds a category to their portfolio"
)]
fn owner_adds_a_category(world: OwnershipWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/portfolio_ownership.feature",
    name = "Another user cannot add a category"
)]
fn another_user_cannot_add_a_category(world: OwnershipWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/portfolio_ownership.feature",
    name = "Category titles are unique within a portfolio"
)]
fn category_titles_are_unique(world: OwnershipWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/portfolio_ownership.feature",
    name = "Content in a deleted portfolio is gone"
)]
fn content_in_a_deleted_portfolio_is_gone(world: OwnershipWorld) {
    let _ = world;
}
