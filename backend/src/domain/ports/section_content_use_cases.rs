//! Driving ports for section content use cases.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{
    ContentKind, Error, PositionUpdate, SectionContent, SectionContentId, SectionId, UserId,
};

/// Input for [`SectionContentCommand::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSectionContentRequest {
    pub caller: UserId,
    pub section_id: SectionId,
    pub kind: ContentKind,
    pub content: String,
    /// `None` appends after the last block.
    pub order: Option<u32>,
}

/// Input for [`SectionContentCommand::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSectionContentRequest {
    pub caller: UserId,
    pub id: SectionContentId,
    pub kind: ContentKind,
    pub content: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionContentCommand: Send + Sync {
    async fn create(&self, request: CreateSectionContentRequest)
    -> Result<SectionContent, Error>;

    async fn update(&self, request: UpdateSectionContentRequest)
    -> Result<SectionContent, Error>;

    async fn update_order(
        &self,
        id: SectionContentId,
        order: u32,
        caller: UserId,
    ) -> Result<(), Error>;

    async fn bulk_reorder(
        &self,
        items: Vec<PositionUpdate<SectionContentId>>,
        caller: UserId,
    ) -> Result<(), Error>;

    async fn delete(&self, id: SectionContentId, caller: UserId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionContentQuery: Send + Sync {
    async fn get(&self, id: SectionContentId, caller: UserId) -> Result<SectionContent, Error>;

    async fn get_public(&self, id: SectionContentId) -> Result<SectionContent, Error>;

    async fn list(
        &self,
        section_id: SectionId,
        page: PageRequest,
    ) -> Result<Page<SectionContent>, Error>;
}
