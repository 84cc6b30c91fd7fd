//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AuditRecorder`], [`ResourceMetrics`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`) are
//! implemented by the domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod audit_recorder;
mod category_repository;
mod category_use_cases;
mod portfolio_repository;
mod portfolio_use_cases;
mod project_repository;
mod project_use_cases;
mod resource_metrics;
mod resource_store_error;
mod resource_stores;
mod section_content_repository;
mod section_content_use_cases;
mod section_repository;
mod section_use_cases;
mod user_repository;
mod user_use_cases;

#[cfg(test)]
pub use audit_recorder::MockAuditRecorder;
pub use audit_recorder::{
    AuditAction, AuditEvent, AuditRecorder, AuditRecorderError, NoOpAuditRecorder,
};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use category_use_cases::{MockCategoryCommand, MockCategoryQuery};
pub use category_use_cases::{
    CategoryCommand, CategoryQuery, CreateCategoryRequest, UpdateCategoryRequest,
};
#[cfg(test)]
pub use portfolio_repository::MockPortfolioRepository;
pub use portfolio_repository::PortfolioRepository;
#[cfg(test)]
pub use portfolio_use_cases::{MockPortfolioCommand, MockPortfolioQuery};
pub use portfolio_use_cases::{
    CreatePortfolioRequest, PortfolioCommand, PortfolioQuery, UpdatePortfolioRequest,
};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::ProjectRepository;
#[cfg(test)]
pub use project_use_cases::{MockProjectCommand, MockProjectQuery};
pub use project_use_cases::{
    CreateProjectRequest, ProjectCommand, ProjectQuery, UpdateProjectRequest,
};
#[cfg(test)]
pub use resource_metrics::MockResourceMetrics;
pub use resource_metrics::{
    Mutation, NoOpResourceMetrics, ResourceMetrics, ResourceMetricsError,
};
pub use resource_store_error::ResourceStoreError;
pub use resource_stores::ResourceStores;
#[cfg(test)]
pub use section_content_repository::MockSectionContentRepository;
pub use section_content_repository::SectionContentRepository;
#[cfg(test)]
pub use section_content_use_cases::{MockSectionContentCommand, MockSectionContentQuery};
pub use section_content_use_cases::{
    CreateSectionContentRequest, SectionContentCommand, SectionContentQuery,
    UpdateSectionContentRequest,
};
#[cfg(test)]
pub use section_repository::MockSectionRepository;
pub use section_repository::SectionRepository;
#[cfg(test)]
pub use section_use_cases::{MockSectionCommand, MockSectionQuery};
pub use section_use_cases::{
    CreateSectionRequest, SectionCommand, SectionQuery, UpdateSectionRequest,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use user_use_cases::{MockUserCommand, MockUserQuery};
pub use user_use_cases::{ExternalIdentity, UpdateProfileRequest, UserCommand, UserQuery};
