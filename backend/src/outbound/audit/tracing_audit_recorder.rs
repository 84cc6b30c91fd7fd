//! Audit sink that writes structured `tracing` records.
//!
//! Events go to the [`AUDIT_TARGET`] target so a subscriber can route them to
//! a dedicated store. Denied access is logged at `warn`, everything else at
//! `info`.

use async_trait::async_trait;
use tracing::{Level, event};

use crate::domain::ports::{AuditAction, AuditEvent, AuditRecorder, AuditRecorderError};

/// Target every audit record is logged under.
pub const AUDIT_TARGET: &str = "folio::audit";

/// Audit recorder backed by the global tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditRecorder;

impl TracingAuditRecorder {
    pub const fn new() -> Self {
        Self
    }
}

/// Extra label fields carried by some actions.
const fn action_detail(action: AuditAction) -> (Option<bool>, Option<usize>) {
    match action {
        AuditAction::Access { allowed } => (Some(allowed), None),
        AuditAction::BulkReorder { count } => (None, Some(count)),
        AuditAction::Create | AuditAction::Update | AuditAction::Delete => (None, None),
    }
}

#[async_trait]
impl AuditRecorder for TracingAuditRecorder {
    async fn record(&self, audit: &AuditEvent) -> Result<(), AuditRecorderError> {
        let (allowed, count) = action_detail(audit.action);
        let data = match &audit.data {
            Some(value) => Some(
                serde_json::to_string(value)
                    .map_err(|err| AuditRecorderError::write(err.to_string()))?,
            ),
            None => None,
        };
        let trace_id = audit.trace_id.map(|id| id.to_string());

        macro_rules! emit {
            ($level:expr) => {
                event!(
                    target: AUDIT_TARGET,
                    $level,
                    entity = audit.entity.as_str(),
                    resource_id = audit.resource_id,
                    actor = audit.actor.get(),
                    action = audit.action.as_str(),
                    allowed,
                    count,
                    data = data.as_deref(),
                    trace_id = trace_id.as_deref(),
                    occurred_at = %audit.occurred_at.to_rfc3339(),
                    "audit event"
                )
            };
        }

        if allowed == Some(false) {
            emit!(Level::WARN);
        } else {
            emit!(Level::INFO);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKind, UserId};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(AuditAction::Access { allowed: false }, (Some(false), None))]
    #[case(AuditAction::BulkReorder { count: 3 }, (None, Some(3)))]
    #[case(AuditAction::Create, (None, None))]
    fn action_details(
        #[case] action: AuditAction,
        #[case] expected: (Option<bool>, Option<usize>),
    ) {
        assert_eq!(action_detail(action), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn recording_never_fails_for_json_payloads() {
        let event = AuditEvent::new(
            EntityKind::Section,
            Some(9),
            UserId::new(1),
            AuditAction::Update,
            Utc::now(),
        )
        .with_data(json!({ "position": 2 }));

        TracingAuditRecorder::new()
            .record(&event)
            .await
            .expect("tracing sink accepts events");
    }
}
