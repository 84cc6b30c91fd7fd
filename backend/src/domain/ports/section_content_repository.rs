//! Port abstraction for section content persistence.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewSectionContent, PositionUpdate, SectionContent, SectionContentId, SectionId};

use super::ResourceStoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionContentRepository: Send + Sync {
    async fn create(
        &self,
        content: &NewSectionContent,
    ) -> Result<SectionContent, ResourceStoreError>;

    async fn find_by_id(
        &self,
        id: SectionContentId,
    ) -> Result<Option<SectionContent>, ResourceStoreError>;

    async fn find_by_ids(
        &self,
        ids: &[SectionContentId],
    ) -> Result<Vec<SectionContent>, ResourceStoreError>;

    /// One page of a section's blocks ordered by `order`, then ID.
    async fn list_by_section(
        &self,
        section_id: SectionId,
        page: PageRequest,
    ) -> Result<Page<SectionContent>, ResourceStoreError>;

    /// Replace kind and content of an existing block.
    async fn update(&self, content: &SectionContent) -> Result<SectionContent, ResourceStoreError>;

    async fn update_order(
        &self,
        id: SectionContentId,
        order: u32,
    ) -> Result<(), ResourceStoreError>;

    /// Apply every update in one transaction or none of them.
    async fn bulk_update_orders(
        &self,
        updates: &[PositionUpdate<SectionContentId>],
    ) -> Result<(), ResourceStoreError>;

    async fn delete(&self, id: SectionContentId) -> Result<bool, ResourceStoreError>;
}
