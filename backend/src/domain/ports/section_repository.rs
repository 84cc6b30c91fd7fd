//! Port abstraction for section persistence.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewSection, PortfolioId, PositionUpdate, Section, SectionId};

use super::ResourceStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn create(&self, section: &NewSection) -> Result<Section, ResourceStoreError>;

    async fn find_by_id(&self, id: SectionId) -> Result<Option<Section>, ResourceStoreError>;

    async fn find_by_ids(&self, ids: &[SectionId]) -> Result<Vec<Section>, ResourceStoreError>;

    /// One page of a portfolio's sections ordered by position, then ID.
    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Section>, ResourceStoreError>;

    async fn update(&self, section: &Section) -> Result<Section, ResourceStoreError>;

    async fn update_position(&self, id: SectionId, position: u32)
    -> Result<(), ResourceStoreError>;

    /// Apply every update in one transaction or none of them.
    async fn bulk_update_positions(
        &self,
        updates: &[PositionUpdate<SectionId>],
    ) -> Result<(), ResourceStoreError>;

    /// Delete a section and its content blocks.
    async fn delete(&self, id: SectionId) -> Result<bool, ResourceStoreError>;

    async fn title_exists(
        &self,
        portfolio_id: PortfolioId,
        title: &str,
        exclude: Option<SectionId>,
    ) -> Result<bool, ResourceStoreError>;
}
