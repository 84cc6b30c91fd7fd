//! Category use cases.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CategoryCommand, CategoryQuery, CreateCategoryRequest, Mutation, UpdateCategoryRequest,
};
use crate::domain::resource_core::{append_position, not_found};
use crate::domain::sinks::snapshot;
use crate::domain::store_errors::store_failure;
use crate::domain::validation::normalise_title;
use crate::domain::{
    Category, CategoryId, EntityId, EntityKind, Error, NewCategory, PortfolioId, PositionUpdate,
    ResourceCore, TitleScope, UserId,
};

const ENTITY: EntityKind = EntityKind::Category;

/// Category service implementing the driving ports.
#[derive(Clone)]
pub struct CategoryService {
    core: Arc<ResourceCore>,
}

impl CategoryService {
    pub fn new(core: Arc<ResourceCore>) -> Self {
        Self { core }
    }

    async fn load(&self, id: CategoryId) -> Result<Category, Error> {
        self.core
            .stores
            .categories
            .find_by_id(id)
            .await
            .map_err(store_failure(ENTITY, "get"))?
            .ok_or_else(|| not_found(id))
    }

    async fn sibling_count(&self, portfolio_id: PortfolioId) -> Result<u64, Error> {
        let page = self
            .core
            .stores
            .categories
            .list_by_portfolio(portfolio_id, PageRequest::new(1, 1))
            .await
            .map_err(store_failure(ENTITY, "count"))?;
        Ok(page.total)
    }
}

#[async_trait]
impl CategoryCommand for CategoryService {
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category, Error> {
        let portfolio_id = request.portfolio_id.ensure_set()?;
        let title = normalise_title(&request.title)?;
        let resolved = self.core.gate.authorize(request.caller, portfolio_id).await?;

        self.core
            .titles
            .ensure_unique(
                &title,
                TitleScope::Category {
                    portfolio: portfolio_id,
                    exclude: None,
                },
            )
            .await?;

        let position = match request.position {
            Some(position) => position,
            None => append_position(self.sibling_count(portfolio_id).await?)?,
        };
        let created = self
            .core
            .stores
            .categories
            .create(&NewCategory {
                portfolio_id,
                owner_id: resolved.owner,
                title,
                description: request.description.trim().to_owned(),
                position,
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

    async fn update(&self, request: UpdateCategoryRequest) -> Result<Category, Error> {
        let id = request.id.ensure_set()?;
        let title = normalise_title(&request.title)?;
        self.core.gate.authorize(request.caller, id).await?;

        let current = self.load(id).await?;
        self.core
            .titles
            .ensure_unique(
                &title,
                TitleScope::Category {
                    portfolio: current.portfolio_id,
                    exclude: Some(id),
                },
            )
            .await?;

        let updated = self
            .core
            .stores
            .categories
            .update(&Category {
                title,
                description: request.description.trim().to_owned(),
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

    async fn update_position(
        &self,
        id: CategoryId,
        position: u32,
        caller: UserId,
    ) -> Result<(), Error> {
        self.core
            .positions
            .update_position::<Category>(id, position, caller)
            .await
    }

    async fn bulk_reorder(
        &self,
        items: Vec<PositionUpdate<CategoryId>>,
        caller: UserId,
    ) -> Result<(), Error> {
        self.core
            .positions
            .bulk_update_positions::<Category>(&items, caller)
            .await
    }

    async fn delete(&self, id: CategoryId, caller: UserId) -> Result<(), Error> {
        id.ensure_set()?;
        self.core.gate.authorize(caller, id).await?;

        let deleted = self
            .core
            .stores
            .categories
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
impl CategoryQuery for CategoryService {
    async fn get(&self, id: CategoryId, caller: UserId) -> Result<Category, Error> {
        id.ensure_set()?;
        self.core.gate.authorize_read(caller, id).await?;
        self.load(id).await
    }

    async fn get_public(&self, id: CategoryId) -> Result<Category, Error> {
        self.load(id.ensure_set()?).await
    }

    async fn list(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Category>, Error> {
        self.core
            .stores
            .categories
            .list_by_portfolio(portfolio_id.ensure_set()?, page)
            .await
            .map_err(store_failure(ENTITY, "list"))
    }
}
