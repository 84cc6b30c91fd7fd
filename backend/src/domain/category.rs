//! Category: an ordered grouping of projects inside a portfolio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, PortfolioId, UserId};

/// Persisted category.
///
/// `owner_id` is a copy of the portfolio owner taken at creation time.
/// Authorization never trusts it; see [`OwnershipResolver`].
///
/// [`OwnershipResolver`]: super::OwnershipResolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub portfolio_id: PortfolioId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`Category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub portfolio_id: PortfolioId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}
