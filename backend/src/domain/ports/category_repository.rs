//! Port abstraction for category persistence.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Category, CategoryId, NewCategory, PortfolioId, PositionUpdate};

use super::ResourceStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &NewCategory) -> Result<Category, ResourceStoreError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, ResourceStoreError>;

    /// Fetch every listed category that exists, in one read.
    async fn find_by_ids(&self, ids: &[CategoryId]) -> Result<Vec<Category>, ResourceStoreError>;

    /// One page of a portfolio's categories ordered by position, then ID.
    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Category>, ResourceStoreError>;

    /// Replace title and description of an existing category.
    async fn update(&self, category: &Category) -> Result<Category, ResourceStoreError>;

    async fn update_position(
        &self,
        id: CategoryId,
        position: u32,
    ) -> Result<(), ResourceStoreError>;

    /// Apply every update in one transaction or none of them.
    async fn bulk_update_positions(
        &self,
        updates: &[PositionUpdate<CategoryId>],
    ) -> Result<(), ResourceStoreError>;

    /// Delete a category and its projects. Returns `false` when absent.
    async fn delete(&self, id: CategoryId) -> Result<bool, ResourceStoreError>;

    /// Whether another category in `portfolio_id` already uses `title`.
    async fn title_exists(
        &self,
        portfolio_id: PortfolioId,
        title: &str,
        exclude: Option<CategoryId>,
    ) -> Result<bool, ResourceStoreError>;
}
