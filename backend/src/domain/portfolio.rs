//! Portfolio: the root of every owned resource tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PortfolioId, UserId};

/// Persisted portfolio. Titles are unique per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: PortfolioId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`Portfolio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortfolio {
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
