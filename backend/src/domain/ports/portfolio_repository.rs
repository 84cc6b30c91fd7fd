//! Port abstraction for portfolio persistence.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewPortfolio, Portfolio, PortfolioId, UserId};

use super::ResourceStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Insert a portfolio and return the stored record.
    async fn create(&self, portfolio: &NewPortfolio) -> Result<Portfolio, ResourceStoreError>;

    async fn find_by_id(&self, id: PortfolioId) -> Result<Option<Portfolio>, ResourceStoreError>;

    /// One page of an owner's portfolios ordered by ID.
    async fn list_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Page<Portfolio>, ResourceStoreError>;

    /// Replace title and description of an existing portfolio.
    async fn update(&self, portfolio: &Portfolio) -> Result<Portfolio, ResourceStoreError>;

    /// Delete a portfolio and, by cascade, its whole tree.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: PortfolioId) -> Result<bool, ResourceStoreError>;

    /// Whether another portfolio of `owner_id` already uses `title`.
    async fn title_exists(
        &self,
        owner_id: UserId,
        title: &str,
        exclude: Option<PortfolioId>,
    ) -> Result<bool, ResourceStoreError>;
}
