//! Project use cases.
//!
//! Projects are two hops from their portfolio. They carry no sibling order
//! and no title uniqueness rule.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CreateProjectRequest, Mutation, ProjectCommand, ProjectQuery, UpdateProjectRequest,
};
use crate::domain::resource_core::not_found;
use crate::domain::sinks::snapshot;
use crate::domain::store_errors::store_failure;
use crate::domain::validation::{normalise_title, optional_text};
use crate::domain::{
    CategoryId, EntityId, EntityKind, Error, NewProject, Project, ProjectId, ProjectMetadata,
    ResourceCore, UserId,
};

const ENTITY: EntityKind = EntityKind::Project;

/// Project service implementing the driving ports.
#[derive(Clone)]
pub struct ProjectService {
    core: Arc<ResourceCore>,
}

impl ProjectService {
    pub fn new(core: Arc<ResourceCore>) -> Self {
        Self { core }
    }

    async fn load(&self, id: ProjectId) -> Result<Project, Error> {
        self.core
            .stores
            .projects
            .find_by_id(id)
            .await
            .map_err(store_failure(ENTITY, "get"))?
            .ok_or_else(|| not_found(id))
    }
}

/// Trim metadata strings and drop blank list entries.
fn clean_metadata(metadata: ProjectMetadata) -> ProjectMetadata {
    let clean_list = |values: Vec<String>| -> Vec<String> {
        values
            .iter()
            .filter_map(|value| optional_text(Some(value.as_str())))
            .collect()
    };
    ProjectMetadata {
        media_urls: clean_list(metadata.media_urls),
        skills: clean_list(metadata.skills),
        client: optional_text(metadata.client.as_deref()),
        project_url: optional_text(metadata.project_url.as_deref()),
    }
}

#[async_trait]
impl ProjectCommand for ProjectService {
    async fn create(&self, request: CreateProjectRequest) -> Result<Project, Error> {
        let category_id = request.category_id.ensure_set()?;
        let title = normalise_title(&request.title)?;
        let resolved = self.core.gate.authorize(request.caller, category_id).await?;

        let created = self
            .core
            .stores
            .projects
            .create(&NewProject {
                category_id,
                owner_id: resolved.owner,
                title,
                description: request.description.trim().to_owned(),
                metadata: clean_metadata(request.metadata),
                created_at: self.core.sinks.now(),
            })
            .await
            .map_err(store_failure(ENTITY, "create"))?;

        self.core
            .finish_mutation(
                ENTITY,
                created.id.get(),
                request.caller,
                Mutation::Created,
                snapshot(ENTITY, &created),
            )
            .await;
        Ok(created)
    }

    async fn update(&self, request: UpdateProjectRequest) -> Result<Project, Error> {
        let id = request.id.ensure_set()?;
        let title = normalise_title(&request.title)?;
        self.core.gate.authorize(request.caller, id).await?;

        let current = self.load(id).await?;
        let updated = self
            .core
            .stores
            .projects
            .update(&Project {
                title,
                description: request.description.trim().to_owned(),
                metadata: clean_metadata(request.metadata),
                updated_at: self.core.sinks.now(),
                ..current
            })
            .await
            .map_err(store_failure(ENTITY, "update"))?;

        self.core
            .finish_mutation(
                ENTITY,
                id.get(),
                request.caller,
                Mutation::Updated,
                snapshot(ENTITY, &updated),
            )
            .await;
        Ok(updated)
    }

    async fn delete(&self, id: ProjectId, caller: UserId) -> Result<(), Error> {
        id.ensure_set()?;
        self.core.gate.authorize(caller, id).await?;

        let deleted = self
            .core
            .stores
            .projects
            .delete(id)
            .await
            .map_err(store_failure(ENTITY, "delete"))?;
        if !deleted {
            return Err(not_found(id));
        }

        self.core
            .finish_mutation(ENTITY, id.get(), caller, Mutation::Deleted, None)
            .await;
        Ok(())
    }
}

#[async_trait]
impl ProjectQuery for ProjectService {
    async fn get(&self, id: ProjectId, caller: UserId) -> Result<Project, Error> {
        id.ensure_set()?;
        self.core.gate.authorize_read(caller, id).await?;
        self.load(id).await
    }

    async fn get_public(&self, id: ProjectId) -> Result<Project, Error> {
        self.load(id.ensure_set()?).await
    }

    async fn list(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Project>, Error> {
        self.core
            .stores
            .projects
            .list_by_category(category_id.ensure_set()?, page)
            .await
            .map_err(store_failure(ENTITY, "list"))
    }
}
