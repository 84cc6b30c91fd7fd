//! Shared fixtures for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::ports::{
    MockAuditRecorder, MockCategoryRepository, MockPortfolioRepository, MockProjectRepository,
    MockResourceMetrics, MockSectionContentRepository, MockSectionRepository,
    MockUserRepository, NoOpResourceMetrics, ResourceStores,
};
use super::{
    Category, CategoryId, ContentKind, Portfolio, PortfolioId, Project, ProjectId,
    ProjectMetadata, Section, SectionContent, SectionContentId, SectionId, Sinks, UserId,
};

pub(crate) const OWNER: UserId = UserId::new(1);
pub(crate) const STRANGER: UserId = UserId::new(2);

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_timestamp().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }
}

/// Mock repositories, one per port, converted into a [`ResourceStores`].
#[derive(Default)]
pub(crate) struct MockStores {
    pub users: MockUserRepository,
    pub portfolios: MockPortfolioRepository,
    pub categories: MockCategoryRepository,
    pub sections: MockSectionRepository,
    pub projects: MockProjectRepository,
    pub section_contents: MockSectionContentRepository,
}

impl MockStores {
    pub(crate) fn into_stores(self) -> ResourceStores {
        ResourceStores {
            users: Arc::new(self.users),
            portfolios: Arc::new(self.portfolios),
            categories: Arc::new(self.categories),
            sections: Arc::new(self.sections),
            projects: Arc::new(self.projects),
            section_contents: Arc::new(self.section_contents),
        }
    }
}

pub(crate) fn sinks_with(audit: MockAuditRecorder) -> Sinks {
    Sinks::new(
        Arc::new(audit),
        Arc::new(NoOpResourceMetrics),
        Arc::new(FixtureClock),
    )
}

pub(crate) fn sinks_with_metrics(audit: MockAuditRecorder, metrics: MockResourceMetrics) -> Sinks {
    Sinks::new(Arc::new(audit), Arc::new(metrics), Arc::new(FixtureClock))
}

pub(crate) fn portfolio(id: u64, owner: UserId) -> Portfolio {
    Portfolio {
        id: PortfolioId::new(id),
        owner_id: owner,
        title: format!("Portfolio {id}"),
        description: String::new(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn category(id: u64, portfolio_id: u64, owner: UserId, position: u32) -> Category {
    Category {
        id: CategoryId::new(id),
        portfolio_id: PortfolioId::new(portfolio_id),
        owner_id: owner,
        title: format!("Category {id}"),
        description: String::new(),
        position,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn section(id: u64, portfolio_id: u64, owner: UserId, position: u32) -> Section {
    Section {
        id: SectionId::new(id),
        portfolio_id: PortfolioId::new(portfolio_id),
        owner_id: owner,
        title: format!("Section {id}"),
        description: String::new(),
        position,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn project(id: u64, category_id: u64, owner: UserId) -> Project {
    Project {
        id: ProjectId::new(id),
        category_id: CategoryId::new(category_id),
        owner_id: owner,
        title: format!("Project {id}"),
        description: String::new(),
        metadata: ProjectMetadata::default(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

pub(crate) fn content(id: u64, section_id: u64, owner: UserId, order: u32) -> SectionContent {
    SectionContent {
        id: SectionContentId::new(id),
        section_id: SectionId::new(section_id),
        owner_id: owner,
        kind: ContentKind::Text,
        content: format!("block {id}"),
        order,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}
