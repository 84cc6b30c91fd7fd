//! Project: a showcased piece of work filed under a category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, ProjectId, UserId};

/// Presentation metadata attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
}

/// Persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub category_id: CategoryId,
    /// Creation-time copy of the portfolio owner.
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub metadata: ProjectMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for [`Project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub category_id: CategoryId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub metadata: ProjectMetadata,
    pub created_at: DateTime<Utc>,
}
