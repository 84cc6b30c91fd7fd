//! Owner-chain resolution.
//!
//! Every owned resource links to exactly one parent until a portfolio is
//! reached:
//!
//! ```text
//! Project -> Category -> Portfolio
//! SectionContent -> Section -> Portfolio
//! ```
//!
//! The portfolio's `owner_id` is the only authoritative owner. Children carry
//! a creation-time copy which is reported as drift when it disagrees, never
//! trusted.

use tracing::debug;

use super::ports::ResourceStores;
use super::store_errors::store_failure;
use super::{EntityKind, Error, PortfolioId, ResourceRef, UserId};

/// One hop of an owner chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OwnerLink {
    Root {
        portfolio: PortfolioId,
        owner: UserId,
    },
    Child {
        parent: ResourceRef,
        recorded_owner: UserId,
    },
}

/// A child whose denormalised owner copy disagrees with its portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerDrift {
    pub resource: ResourceRef,
    pub recorded_owner: UserId,
}

/// Outcome of walking an owner chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOwner {
    /// Owner of the root portfolio.
    pub owner: UserId,
    /// Root portfolio of the chain.
    pub portfolio: PortfolioId,
    /// Children on the walked chain whose recorded owner is stale.
    pub drift: Vec<OwnerDrift>,
}

/// Walks parent links up to the root portfolio using repository reads only.
#[derive(Clone)]
pub struct OwnershipResolver {
    stores: ResourceStores,
}

impl OwnershipResolver {
    pub fn new(stores: ResourceStores) -> Self {
        Self { stores }
    }

    /// Resolve the authoritative owner of `resource`.
    ///
    /// Fails with `NotFound` naming `resource` when any link of the chain is
    /// absent, so callers never report a deleted ancestor as an
    /// authorization failure.
    pub async fn resolve(&self, resource: ResourceRef) -> Result<ResolvedOwner, Error> {
        let mut current = resource;
        let mut recorded = Vec::new();
        loop {
            let Some(link) = self.link(current).await? else {
                return Err(missing_link(resource, current));
            };
            match link {
                OwnerLink::Root { portfolio, owner } => {
                    let drift = recorded
                        .into_iter()
                        .filter(|entry: &OwnerDrift| entry.recorded_owner != owner)
                        .collect();
                    return Ok(ResolvedOwner {
                        owner,
                        portfolio,
                        drift,
                    });
                }
                OwnerLink::Child {
                    parent,
                    recorded_owner,
                } => {
                    debug!(from = %current, to = %parent, "following owner link");
                    recorded.push(OwnerDrift {
                        resource: current,
                        recorded_owner,
                    });
                    current = parent;
                }
            }
        }
    }

    async fn link(&self, resource: ResourceRef) -> Result<Option<OwnerLink>, Error> {
        const OPERATION: &str = "resolve owner of";
        let link = match resource {
            ResourceRef::Portfolio(id) => self
                .stores
                .portfolios
                .find_by_id(id)
                .await
                .map_err(store_failure(EntityKind::Portfolio, OPERATION))?
                .map(|portfolio| OwnerLink::Root {
                    portfolio: portfolio.id,
                    owner: portfolio.owner_id,
                }),
            ResourceRef::Category(id) => self
                .stores
                .categories
                .find_by_id(id)
                .await
                .map_err(store_failure(EntityKind::Category, OPERATION))?
                .map(|category| OwnerLink::Child {
                    parent: category.portfolio_id.into(),
                    recorded_owner: category.owner_id,
                }),
            ResourceRef::Section(id) => self
                .stores
                .sections
                .find_by_id(id)
                .await
                .map_err(store_failure(EntityKind::Section, OPERATION))?
                .map(|section| OwnerLink::Child {
                    parent: section.portfolio_id.into(),
                    recorded_owner: section.owner_id,
                }),
            ResourceRef::Project(id) => self
                .stores
                .projects
                .find_by_id(id)
                .await
                .map_err(store_failure(EntityKind::Project, OPERATION))?
                .map(|project| OwnerLink::Child {
                    parent: project.category_id.into(),
                    recorded_owner: project.owner_id,
                }),
            ResourceRef::SectionContent(id) => self
                .stores
                .section_contents
                .find_by_id(id)
                .await
                .map_err(store_failure(EntityKind::SectionContent, OPERATION))?
                .map(|content| OwnerLink::Child {
                    parent: content.section_id.into(),
                    recorded_owner: content.owner_id,
                }),
        };
        Ok(link)
    }
}

fn missing_link(requested: ResourceRef, missing: ResourceRef) -> Error {
    if requested == missing {
        return Error::not_found(format!("{requested} not found"));
    }
    Error::not_found(format!("{requested} not found")).with_details(serde_json::json!({
        "missingAncestor": {
            "entity": missing.kind().as_str(),
            "id": missing.raw_id(),
        }
    }))
}

#[cfg(test)]
mod tests;
