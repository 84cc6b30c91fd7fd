//! Driving ports for portfolio use cases.
//!
//! Inbound adapters call these traits with the authenticated caller already
//! resolved; the core never sees transport concerns.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, Portfolio, PortfolioId, UserId};

/// Input for [`PortfolioCommand::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePortfolioRequest {
    /// Authenticated caller; becomes the owner.
    pub caller: UserId,
    pub title: String,
    pub description: String,
}

/// Input for [`PortfolioCommand::update`]. Replaces title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePortfolioRequest {
    pub caller: UserId,
    pub id: PortfolioId,
    pub title: String,
    pub description: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioCommand: Send + Sync {
    async fn create(&self, request: CreatePortfolioRequest) -> Result<Portfolio, Error>;

    async fn update(&self, request: UpdatePortfolioRequest) -> Result<Portfolio, Error>;

    /// Delete a portfolio together with its categories, projects, sections
    /// and section content.
    async fn delete(&self, id: PortfolioId, caller: UserId) -> Result<(), Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioQuery: Send + Sync {
    /// Owner-only read; audited.
    async fn get(&self, id: PortfolioId, caller: UserId) -> Result<Portfolio, Error>;

    /// Unauthenticated read.
    async fn get_public(&self, id: PortfolioId) -> Result<Portfolio, Error>;

    /// Public listing of an owner's portfolios.
    async fn list(&self, owner_id: UserId, page: PageRequest) -> Result<Page<Portfolio>, Error>;
}
