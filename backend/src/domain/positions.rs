//! Sibling ordering for categories, sections and section content.
//!
//! Single moves write one value and never renumber the other siblings.
//! Bulk reorders authorize every distinct parent before touching storage
//! and then apply all updates in one storage transaction, so a request
//! either lands completely or leaves every position as it was.

use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ports::{AuditAction, Mutation, ResourceStoreError, ResourceStores};
use super::store_errors::store_failure;
use super::{
    AuthorizationGate, Category, CategoryId, EntityId, Error, PortfolioId, ResourceRef, Section,
    SectionContent, SectionContentId, SectionId, Sinks, UserId,
};

/// Target position for one sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionUpdate<I> {
    pub id: I,
    pub position: u32,
}

impl<I> PositionUpdate<I> {
    pub const fn new(id: I, position: u32) -> Self {
        Self { id, position }
    }
}

/// An entity ordered among the children of one parent.
pub trait Positioned: Send + Sync + 'static {
    type Id: EntityId + Into<ResourceRef>;
    type Parent: EntityId + Into<ResourceRef>;

    fn id(&self) -> Self::Id;
    fn parent(&self) -> Self::Parent;
}

impl Positioned for Category {
    type Id = CategoryId;
    type Parent = PortfolioId;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn parent(&self) -> PortfolioId {
        self.portfolio_id
    }
}

impl Positioned for Section {
    type Id = SectionId;
    type Parent = PortfolioId;

    fn id(&self) -> SectionId {
        self.id
    }

    fn parent(&self) -> PortfolioId {
        self.portfolio_id
    }
}

impl Positioned for SectionContent {
    type Id = SectionContentId;
    type Parent = SectionId;

    fn id(&self) -> SectionContentId {
        self.id
    }

    fn parent(&self) -> SectionId {
        self.section_id
    }
}

/// Position reads and writes for one positioned entity type.
#[async_trait]
pub trait SiblingStore<E: Positioned>: Send + Sync {
    async fn load_siblings(&self, ids: &[E::Id]) -> Result<Vec<E>, ResourceStoreError>;

    async fn write_position(&self, id: E::Id, position: u32) -> Result<(), ResourceStoreError>;

    /// All-or-nothing.
    async fn write_positions(
        &self,
        updates: &[PositionUpdate<E::Id>],
    ) -> Result<(), ResourceStoreError>;
}

#[async_trait]
impl SiblingStore<Category> for ResourceStores {
    async fn load_siblings(
        &self,
        ids: &[CategoryId],
    ) -> Result<Vec<Category>, ResourceStoreError> {
        self.categories.find_by_ids(ids).await
    }

    async fn write_position(
        &self,
        id: CategoryId,
        position: u32,
    ) -> Result<(), ResourceStoreError> {
        self.categories.update_position(id, position).await
    }

    async fn write_positions(
        &self,
        updates: &[PositionUpdate<CategoryId>],
    ) -> Result<(), ResourceStoreError> {
        self.categories.bulk_update_positions(updates).await
    }
}

#[async_trait]
impl SiblingStore<Section> for ResourceStores {
    async fn load_siblings(&self, ids: &[SectionId]) -> Result<Vec<Section>, ResourceStoreError> {
        self.sections.find_by_ids(ids).await
    }

    async fn write_position(
        &self,
        id: SectionId,
        position: u32,
    ) -> Result<(), ResourceStoreError> {
        self.sections.update_position(id, position).await
    }

    async fn write_positions(
        &self,
        updates: &[PositionUpdate<SectionId>],
    ) -> Result<(), ResourceStoreError> {
        self.sections.bulk_update_positions(updates).await
    }
}

#[async_trait]
impl SiblingStore<SectionContent> for ResourceStores {
    async fn load_siblings(
        &self,
        ids: &[SectionContentId],
    ) -> Result<Vec<SectionContent>, ResourceStoreError> {
        self.section_contents.find_by_ids(ids).await
    }

    async fn write_position(
        &self,
        id: SectionContentId,
        position: u32,
    ) -> Result<(), ResourceStoreError> {
        self.section_contents.update_order(id, position).await
    }

    async fn write_positions(
        &self,
        updates: &[PositionUpdate<SectionContentId>],
    ) -> Result<(), ResourceStoreError> {
        self.section_contents.bulk_update_orders(updates).await
    }
}

#[derive(Clone)]
pub struct PositionManager {
    stores: ResourceStores,
    gate: AuthorizationGate,
    sinks: Sinks,
}

impl PositionManager {
    pub fn new(stores: ResourceStores, gate: AuthorizationGate, sinks: Sinks) -> Self {
        Self {
            stores,
            gate,
            sinks,
        }
    }

    /// Move one sibling. Other siblings keep their values.
    pub async fn update_position<E>(
        &self,
        id: E::Id,
        position: u32,
        caller: UserId,
    ) -> Result<(), Error>
    where
        E: Positioned,
        ResourceStores: SiblingStore<E>,
    {
        let kind = <E::Id as EntityId>::KIND;
        id.ensure_set()?;
        self.gate.authorize(caller, id).await?;

        SiblingStore::<E>::write_position(&self.stores, id, position)
            .await
            .map_err(store_failure(kind, "reposition"))?;

        self.sinks
            .mutation(
                kind,
                id.raw(),
                caller,
                AuditAction::Update,
                Some(serde_json::json!({ "position": position })),
            )
            .await;
        self.sinks.count(kind, Mutation::Updated).await;
        Ok(())
    }

    /// Reposition several siblings, possibly under different parents.
    ///
    /// Fails before any write when the list is empty or repeats an ID
    /// (`InvalidInput`), when any ID does not exist (`NotFound`), or when any
    /// distinct parent is not owned by `caller` (`Unauthorized`).
    pub async fn bulk_update_positions<E>(
        &self,
        items: &[PositionUpdate<E::Id>],
        caller: UserId,
    ) -> Result<(), Error>
    where
        E: Positioned,
        ResourceStores: SiblingStore<E>,
    {
        let kind = <E::Id as EntityId>::KIND;
        caller.ensure_set()?;
        let ids = validate_items(items)?;

        let found = SiblingStore::<E>::load_siblings(&self.stores, &ids)
            .await
            .map_err(store_failure(kind, "load for reorder"))?;
        if found.len() != ids.len() {
            let present: HashSet<E::Id> = found.iter().map(Positioned::id).collect();
            let missing: Vec<u64> = ids
                .iter()
                .filter(|id| !present.contains(*id))
                .map(|id| id.raw())
                .collect();
            let message = format!("{} of {} {kind} ids not found", missing.len(), ids.len());
            return Err(
                Error::not_found(message).with_details(serde_json::json!({ "missing": missing }))
            );
        }

        let parents: BTreeSet<E::Parent> = found.iter().map(Positioned::parent).collect();
        for parent in parents {
            self.gate.authorize(caller, parent).await?;
        }

        SiblingStore::<E>::write_positions(&self.stores, items)
            .await
            .map_err(store_failure(kind, "reorder"))?;

        info!(
            entity = kind.as_str(),
            count = items.len(),
            caller = %caller,
            "bulk reorder applied",
        );
        self.sinks.bulk_reorder(kind, caller, items.len()).await;
        self.sinks.count(kind, Mutation::Reordered).await;
        Ok(())
    }
}

fn validate_items<I: EntityId>(items: &[PositionUpdate<I>]) -> Result<Vec<I>, Error> {
    if items.is_empty() {
        return Err(Error::invalid_input("reorder requires at least one item"));
    }
    let mut seen = HashSet::with_capacity(items.len());
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        let id = item.id.ensure_set()?;
        if !seen.insert(id) {
            return Err(Error::invalid_input(format!(
                "{} {id} appears more than once in one reorder",
                I::KIND
            )));
        }
        ids.push(id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests;
