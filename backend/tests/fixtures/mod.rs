//! Seeding helpers shared by the service-level integration tests.

use folio_backend::domain::ports::{
    CreateCategoryRequest, CreatePortfolioRequest, CreateProjectRequest,
    CreateSectionContentRequest, CreateSectionRequest, ExternalIdentity,
};
use folio_backend::domain::{
    Category, ContentKind, Portfolio, Project, ProjectMetadata, Section, SectionContent, UserId,
};
use folio_backend::test_support::TestHarness;

/// Register a user through the identity sync path.
pub async fn user(harness: &TestHarness, handle: &str) -> UserId {
    harness
        .services
        .users
        .sync_identity(ExternalIdentity {
            external_id: format!("auth0|{handle}"),
            email: format!("{handle}@example.com"),
            name: handle.to_owned(),
        })
        .await
        .expect("identity sync")
        .id
}

pub async fn portfolio(harness: &TestHarness, owner: UserId, title: &str) -> Portfolio {
    harness
        .services
        .portfolios
        .create(CreatePortfolioRequest {
            caller: owner,
            title: title.to_owned(),
            description: String::new(),
        })
        .await
        .expect("portfolio created")
}

pub async fn category(harness: &TestHarness, portfolio: &Portfolio, title: &str) -> Category {
    harness
        .services
        .categories
        .create(CreateCategoryRequest {
            caller: portfolio.owner_id,
            portfolio_id: portfolio.id,
            title: title.to_owned(),
            description: String::new(),
            position: None,
        })
        .await
        .expect("category created")
}

pub async fn section(harness: &TestHarness, portfolio: &Portfolio, title: &str) -> Section {
    harness
        .services
        .sections
        .create(CreateSectionRequest {
            caller: portfolio.owner_id,
            portfolio_id: portfolio.id,
            title: title.to_owned(),
            description: String::new(),
            position: None,
        })
        .await
        .expect("section created")
}

pub async fn project(harness: &TestHarness, category: &Category, title: &str) -> Project {
    harness
        .services
        .projects
        .create(CreateProjectRequest {
            caller: category.owner_id,
            category_id: category.id,
            title: title.to_owned(),
            description: String::new(),
            metadata: ProjectMetadata::default(),
        })
        .await
        .expect("project created")
}

pub async fn content(harness: &TestHarness, section: &Section, body: &str) -> SectionContent {
    harness
        .services
        .section_contents
        .create(CreateSectionContentRequest {
            caller: section.owner_id,
            section_id: section.id,
            kind: ContentKind::Text,
            content: body.to_owned(),
            order: None,
        })
        .await
        .expect("content created")
}
