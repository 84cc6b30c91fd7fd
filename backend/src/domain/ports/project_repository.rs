//! Port abstraction for project persistence.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CategoryId, NewProject, Project, ProjectId};

use super::ResourceStoreError;

/// Projects have no sibling ordering and no title uniqueness rule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &NewProject) -> Result<Project, ResourceStoreError>;

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ResourceStoreError>;

    /// One page of a category's projects ordered by ID.
    async fn list_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Project>, ResourceStoreError>;

    /// Replace title, description and metadata of an existing project.
    async fn update(&self, project: &Project) -> Result<Project, ResourceStoreError>;

    async fn delete(&self, id: ProjectId) -> Result<bool, ResourceStoreError>;
}
