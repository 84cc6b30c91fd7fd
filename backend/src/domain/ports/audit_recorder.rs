//! Append-only audit sink consumed by the domain.
//!
//! Audit events record completed mutations and access decisions for
//! traceability. The domain never reads them back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{EntityKind, TraceId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by audit sink adapters.
    pub enum AuditRecorderError {
        /// The sink rejected or failed to persist the event.
        Write { message: String } => "audit sink write failed: {message}",
    }
}

/// What happened to the audited resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    /// Access decision taken by the authorization gate.
    Access { allowed: bool },
    /// Aggregate event for one all-or-nothing reorder.
    BulkReorder { count: usize },
}

impl AuditAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Access { .. } => "access",
            Self::BulkReorder { .. } => "bulk_reorder",
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    pub entity: EntityKind,
    /// `None` for events spanning several resources.
    pub resource_id: Option<u64>,
    /// Caller that triggered the event.
    pub actor: UserId,
    pub action: AuditAction,
    /// Snapshot of the written record, when there is one.
    pub data: Option<Value>,
    pub trace_id: Option<TraceId>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Build an event stamped with the trace identifier in scope.
    pub fn new(
        entity: EntityKind,
        resource_id: Option<u64>,
        actor: UserId,
        action: AuditAction,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity,
            resource_id,
            actor,
            action,
            data: None,
            trace_id: TraceId::current(),
            occurred_at,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    async fn record(&self, event: &AuditEvent) -> Result<(), AuditRecorderError>;
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAuditRecorder;

#[async_trait]
impl AuditRecorder for NoOpAuditRecorder {
    async fn record(&self, _event: &AuditEvent) -> Result<(), AuditRecorderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn events_pick_up_the_trace_in_scope() {
        let trace_id = TraceId::generate();
        let event = TraceId::scope(trace_id, async {
            AuditEvent::new(
                EntityKind::Category,
                Some(4),
                UserId::new(1),
                AuditAction::Delete,
                Utc::now(),
            )
        })
        .await;
        assert_eq!(event.trace_id, Some(trace_id));
        assert!(event.data.is_none());
    }

    #[rstest]
    #[case(AuditAction::Access { allowed: false }, "access")]
    #[case(AuditAction::BulkReorder { count: 3 }, "bulk_reorder")]
    fn action_labels(#[case] action: AuditAction, #[case] label: &str) {
        assert_eq!(action.as_str(), label);
    }

    #[rstest]
    #[tokio::test]
    async fn noop_recorder_accepts_events() {
        let event = AuditEvent::new(
            EntityKind::User,
            Some(1),
            UserId::new(1),
            AuditAction::Create,
            Utc::now(),
        );
        assert!(NoOpAuditRecorder.record(&event).await.is_ok());
    }
}
