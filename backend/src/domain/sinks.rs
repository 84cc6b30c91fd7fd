//! Cross-cutting collaborators shared by every use case: audit, metrics and
//! the clock.
//!
//! Sink failures are logged and swallowed. By the time an event is emitted
//! the mutation it describes has already been persisted, and nothing in the
//! domain reads audit or metric data back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::ports::{AuditAction, AuditEvent, AuditRecorder, Mutation, ResourceMetrics};
use super::{EntityKind, UserId};

/// Audit recorder, metrics recorder and clock passed into every service.
#[derive(Clone)]
pub struct Sinks {
    audit: Arc<dyn AuditRecorder>,
    metrics: Arc<dyn ResourceMetrics>,
    clock: Arc<dyn Clock>,
}

impl Sinks {
    pub fn new(
        audit: Arc<dyn AuditRecorder>,
        metrics: Arc<dyn ResourceMetrics>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            audit,
            metrics,
            clock,
        }
    }

    /// Current UTC time from the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Record an access decision.
    pub async fn access(
        &self,
        entity: EntityKind,
        resource_id: u64,
        caller: UserId,
        allowed: bool,
    ) {
        let event = AuditEvent::new(
            entity,
            Some(resource_id),
            caller,
            AuditAction::Access { allowed },
            self.now(),
        );
        self.record(event).await;
    }

    /// Record a completed create, update or delete.
    pub async fn mutation(
        &self,
        entity: EntityKind,
        resource_id: u64,
        actor: UserId,
        action: AuditAction,
        data: Option<Value>,
    ) {
        let mut event = AuditEvent::new(entity, Some(resource_id), actor, action, self.now());
        event.data = data;
        self.record(event).await;
    }

    /// Record one aggregate reorder spanning `count` resources.
    pub async fn bulk_reorder(&self, entity: EntityKind, actor: UserId, count: usize) {
        let event = AuditEvent::new(
            entity,
            None,
            actor,
            AuditAction::BulkReorder { count },
            self.now(),
        );
        self.record(event).await;
    }

    /// Count a completed mutation.
    pub async fn count(&self, entity: EntityKind, mutation: Mutation) {
        if let Err(error) = self.metrics.record_mutation(entity, mutation).await {
            warn!(
                entity = entity.as_str(),
                mutation = mutation.as_str(),
                error = %error,
                "failed to record resource metric",
            );
        }
    }

    async fn record(&self, event: AuditEvent) {
        if let Err(error) = self.audit.record(&event).await {
            warn!(
                entity = event.entity.as_str(),
                action = event.action.as_str(),
                error = %error,
                "failed to record audit event",
            );
        }
    }
}

/// Serialise a written record for an audit event.
///
/// A record that cannot be serialised is audited without its snapshot.
pub fn snapshot<T: Serialize>(entity: EntityKind, record: &T) -> Option<Value> {
    match serde_json::to_value(record) {
        Ok(data) => Some(data),
        Err(error) => {
            warn!(
                entity = entity.as_str(),
                error = %error,
                "audit snapshot could not be serialised",
            );
            None
        }
    }
}
