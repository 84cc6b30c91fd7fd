//! Driving ports for project use cases.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CategoryId, Error, Project, ProjectId, ProjectMetadata, UserId};

/// Input for [`ProjectCommand::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub caller: UserId,
    pub category_id: CategoryId,
    pub title: String,
    pub description: String,
    pub metadata: ProjectMetadata,
}

/// Input for [`ProjectCommand::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    pub caller: UserId,
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub metadata: ProjectMetadata,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectCommand: Send + Sync {
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, Error>;

    async fn update(&self, request: UpdateProjectRequest) -> Result<Project, Error>;

    async fn delete(&self, id: ProjectId, caller: UserId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectQuery: Send + Sync {
    async fn get(&self, id: ProjectId, caller: UserId) -> Result<Project, Error>;

    async fn get_public(&self, id: ProjectId) -> Result<Project, Error>;

    async fn list(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Project>, Error>;
}
