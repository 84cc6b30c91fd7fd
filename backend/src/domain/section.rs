//! Section: an ordered block of content inside a portfolio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PortfolioId, SectionId, UserId};

/// Persisted section. Titles are unique per portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub portfolio_id: PortfolioId,
    /// Creation-time copy of the portfolio owner.
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`Section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSection {
    pub portfolio_id: PortfolioId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}
