//! Collaborators shared by every use-case service.

use serde_json::Value;

use super::ports::{AuditAction, Mutation, ResourceStores};
use super::{
    AuthorizationGate, DuplicateGuard, EntityId, EntityKind, Error, OwnershipResolver,
    PositionManager, Sinks, UserId,
};

/// One resolver, gate, guard and position manager over a store bundle.
///
/// The core keeps no state between calls; every decision is re-derived from
/// storage.
#[derive(Clone)]
pub struct ResourceCore {
    pub(crate) stores: ResourceStores,
    pub(crate) gate: AuthorizationGate,
    pub(crate) titles: DuplicateGuard,
    pub(crate) positions: PositionManager,
    pub(crate) sinks: Sinks,
}

impl ResourceCore {
    pub fn new(stores: ResourceStores, sinks: Sinks) -> Self {
        let resolver = OwnershipResolver::new(stores.clone());
        let gate = AuthorizationGate::new(resolver, sinks.clone());
        let titles = DuplicateGuard::new(stores.clone());
        let positions = PositionManager::new(stores.clone(), gate.clone(), sinks.clone());
        Self {
            stores,
            gate,
            titles,
            positions,
            sinks,
        }
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    pub fn positions(&self) -> &PositionManager {
        &self.positions
    }

    /// Audit and count a persisted mutation.
    pub(crate) async fn finish_mutation(
        &self,
        entity: EntityKind,
        resource_id: u64,
        actor: UserId,
        mutation: Mutation,
        data: Option<Value>,
    ) {
        let action = match mutation {
            Mutation::Created => AuditAction::Create,
            Mutation::Deleted => AuditAction::Delete,
            Mutation::Updated | Mutation::Reordered => AuditAction::Update,
        };
        self.sinks
            .mutation(entity, resource_id, actor, action, data)
            .await;
        self.sinks.count(entity, mutation).await;
    }
}

/// `NotFound` for a record that was read back empty.
pub(crate) fn not_found<I: EntityId>(id: I) -> Error {
    Error::not_found(format!("{} {id} not found", I::KIND))
}

/// Position that appends after `sibling_count` existing siblings.
pub(crate) fn append_position(sibling_count: u64) -> Result<u32, Error> {
    u32::try_from(sibling_count)
        .map_err(|_| Error::internal("sibling count exceeds the supported position range"))
}
