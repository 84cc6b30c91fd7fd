//! Driving ports for section use cases.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, PortfolioId, PositionUpdate, Section, SectionId, UserId};

/// Input for [`SectionCommand::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSectionRequest {
    pub caller: UserId,
    pub portfolio_id: PortfolioId,
    pub title: String,
    pub description: String,
    /// `None` appends after the last sibling.
    pub position: Option<u32>,
}

/// Input for [`SectionCommand::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSectionRequest {
    pub caller: UserId,
    pub id: SectionId,
    pub title: String,
    pub description: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionCommand: Send + Sync {
    async fn create(&self, request: CreateSectionRequest) -> Result<Section, Error>;

    async fn update(&self, request: UpdateSectionRequest) -> Result<Section, Error>;

    async fn update_position(
        &self,
        id: SectionId,
        position: u32,
        caller: UserId,
    ) -> Result<(), Error>;

    async fn bulk_reorder(
        &self,
        items: Vec<PositionUpdate<SectionId>>,
        caller: UserId,
    ) -> Result<(), Error>;

    async fn delete(&self, id: SectionId, caller: UserId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionQuery: Send + Sync {
    async fn get(&self, id: SectionId, caller: UserId) -> Result<Section, Error>;

    async fn get_public(&self, id: SectionId) -> Result<Section, Error>;

    async fn list(
        &self,
        portfolio_id: PortfolioId,
        page: PageRequest,
    ) -> Result<Page<Section>, Error>;
}
