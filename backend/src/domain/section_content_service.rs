//! Section content use cases.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CreateSectionContentRequest, Mutation, SectionContentCommand, SectionContentQuery,
    UpdateSectionContentRequest,
};
use crate::domain::resource_core::{append_position, not_found};
use crate::domain::sinks::snapshot;
use crate::domain::store_errors::store_failure;
use crate::domain::validation::require_text;
use crate::domain::{
    EntityId, EntityKind, Error, NewSectionContent, PositionUpdate, ResourceCore, SectionContent,
    SectionContentId, SectionId, UserId,
};

const ENTITY: EntityKind = EntityKind::SectionContent;

/// Section content service implementing the driving ports.
#[derive(Clone)]
pub struct SectionContentService {
    core: Arc<ResourceCore>,
}

impl SectionContentService {
    pub fn new(core: Arc<ResourceCore>) -> Self {
        Self { core }
    }

    async fn load(&self, id: SectionContentId) -> Result<SectionContent, Error> {
        self.core
            .stores
            .section_contents
            .find_by_id(id)
            .await
            .map_err(store_failure(ENTITY, "get"))?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl SectionContentCommand for SectionContentService {
    async fn create(
        &self,
        request: CreateSectionContentRequest,
    ) -> Result<SectionContent, Error> {
        let section_id = request.section_id.ensure_set()?;
        let content = require_text("content", &request.content)?;
        let resolved = self.core.gate.authorize(request.caller, section_id).await?;

        let order = match request.order {
            Some(order) => order,
            None => {
                let existing = self
                    .core
                    .stores
                    .section_contents
                    .list_by_section(section_id, PageRequest::new(1, 1))
                    .await
                    .map_err(store_failure(ENTITY, "count"))?;
                append_position(existing.total)?
            }
        };

        let created = self
            .core
            .stores
            .section_contents
            .create(&NewSectionContent {
                section_id,
                owner_id: resolved.owner,
                kind: request.kind,
                content,
                order,
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

    async fn update(
        &self,
        request: UpdateSectionContentRequest,
    ) -> Result<SectionContent, Error> {
        let id = request.id.ensure_set()?;
        let content = require_text("content", &request.content)?;
        self.core.gate.authorize(request.caller, id).await?;

        let current = self.load(id).await?;
        let updated = self
            .core
            .stores
            .section_contents
            .update(&SectionContent {
                kind: request.kind,
                content,
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

    async fn update_order(
        &self,
        id: SectionContentId,
        order: u32,
        caller: UserId,
    ) -> Result<(), Error> {
        self.core
            .positions
            .update_position::<SectionContent>(id, order, caller)
            .await
    }

    async fn bulk_reorder(
        &self,
        items: Vec<PositionUpdate<SectionContentId>>,
        caller: UserId,
    ) -> Result<(), Error> {
        self.core
            .positions
            .bulk_update_positions::<SectionContent>(&items, caller)
            .await
    }

    async fn delete(&self, id: SectionContentId, caller: UserId) -> Result<(), Error> {
        id.ensure_set()?;
        self.core.gate.authorize(caller, id).await?;

        let deleted = self
            .core
            .stores
            .section_contents
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
impl SectionContentQuery for SectionContentService {
    async fn get(&self, id: SectionContentId, caller: UserId) -> Result<SectionContent, Error> {
        id.ensure_set()?;
        self.core.gate.authorize_read(caller, id).await?;
        self.load(id).await
    }

    async fn get_public(&self, id: SectionContentId) -> Result<SectionContent, Error> {
        self.load(id.ensure_set()?).await
    }

    async fn list(
        &self,
        section_id: SectionId,
        page: PageRequest,
    ) -> Result<Page<SectionContent>, Error> {
        self.core
            .stores
            .section_contents
            .list_by_section(section_id.ensure_set()?, page)
            .await
            .map_err(store_failure(ENTITY, "list"))
    }
}
