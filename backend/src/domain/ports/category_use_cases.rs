//! Driving ports for category use cases.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Category, CategoryId, Error, PortfolioId, PositionUpdate, UserId};

/// Input for [`CategoryCommand::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pub caller: UserId,
    pub portfolio_id: PortfolioId,
    pub title: String,
    pub description: String,
    /// `None` appends after the last sibling.
    pub position: Option<u32>,
}

/// Input for [`CategoryCommand::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    pub caller: UserId,
    pub id: CategoryId,
    pub title: String,
    pub description: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    async fn create(&self, request: CreateCategoryRequest) -> Result<Category, Error>;

    async fn update(&self, request: UpdateCategoryRequest) -> Result<Category, Error>;

    /// Move one category without renumbering its siblings.
    async fn update_position(
        &self,
        id: CategoryId,
        position: u32,
        caller: UserId,
    ) -> Result<(), Error>;

    /// Reposition several categories, possibly across portfolios, atomically.
    async fn bulk_reorder(
        &self,
        items: Vec<PositionUpdate<CategoryId>>,
        caller: UserId,
    ) -> Result<(), Error>;

    async fn delete(&self, id: CategoryId, caller: UserId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    async fn get(&self, id: CategoryId, caller: UserId) -> Result<Category, Error>;

    async fn get_public(&self, id: CategoryId) -> Result<Category, Error>;

    async fn list(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Category>, Error>;
}
