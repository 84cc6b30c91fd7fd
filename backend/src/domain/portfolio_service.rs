//! Portfolio use cases.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CreatePortfolioRequest, Mutation, PortfolioCommand, PortfolioQuery, UpdatePortfolioRequest,
};
use crate::domain::resource_core::not_found;
use crate::domain::sinks::snapshot;
use crate::domain::store_errors::store_failure;
use crate::domain::validation::normalise_title;
use crate::domain::{
    EntityId, EntityKind, Error, NewPortfolio, Portfolio, PortfolioId, ResourceCore, TitleScope,
    UserId,
};

const ENTITY: EntityKind = EntityKind::Portfolio;

/// Portfolio service implementing the driving ports.
#[derive(Clone)]
pub struct PortfolioService {
    core: Arc<ResourceCore>,
}

impl PortfolioService {
    pub fn new(core: Arc<ResourceCore>) -> Self {
        Self { core }
    }

    async fn load(&self, id: PortfolioId) -> Result<Portfolio, Error> {
        self.core
            .stores
            .portfolios
            .find_by_id(id)
            .await
            .map_err(store_failure(ENTITY, "get"))?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl PortfolioCommand for PortfolioService {
    async fn create(&self, request: CreatePortfolioRequest) -> Result<Portfolio, Error> {
        let owner = request.caller.ensure_set()?;
        let title = normalise_title(&request.title)?;

        self.core
            .titles
            .ensure_unique(
                &title,
                TitleScope::Portfolio {
                    owner,
                    exclude: None,
                },
            )
            .await?;

        let created = self
            .core
            .stores
            .portfolios
            .create(&NewPortfolio {
                owner_id: owner,
                title,
                description: request.description.trim().to_owned(),
                created_at: self.core.sinks.now(),
            })
            .await
            .map_err(store_failure(ENTITY, "create"))?;

        self.core
            .finish_mutation(
                ENTITY,
                created.id.get(),
                owner,
                Mutation::Created,
                snapshot(ENTITY, &created),
            )
            .await;
        Ok(created)
    }

    async fn update(&self, request: UpdatePortfolioRequest) -> Result<Portfolio, Error> {
        let id = request.id.ensure_set()?;
        let title = normalise_title(&request.title)?;
        self.core.gate.authorize(request.caller, id).await?;

        let current = self.load(id).await?;
        self.core
            .titles
            .ensure_unique(
                &title,
                TitleScope::Portfolio {
                    owner: current.owner_id,
                    exclude: Some(id),
                },
            )
            .await?;

        let updated = self
            .core
            .stores
            .portfolios
            .update(&Portfolio {
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

    async fn delete(&self, id: PortfolioId, caller: UserId) -> Result<(), Error> {
        id.ensure_set()?;
        self.core.gate.authorize(caller, id).await?;

        let deleted = self
            .core
            .stores
            .portfolios
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
impl PortfolioQuery for PortfolioService {
    async fn get(&self, id: PortfolioId, caller: UserId) -> Result<Portfolio, Error> {
        id.ensure_set()?;
        self.core.gate.authorize_read(caller, id).await?;
        self.load(id).await
    }

    async fn get_public(&self, id: PortfolioId) -> Result<Portfolio, Error> {
        self.load(id.ensure_set()?).await
    }

    async fn list(&self, owner_id: UserId, page: PageRequest) -> Result<Page<Portfolio>, Error> {
        self.core
            .stores
            .portfolios
            .list_by_owner(owner_id.ensure_set()?, page)
            .await
            .map_err(store_failure(ENTITY, "list"))
    }
}
