//! Domain port for counting completed resource mutations.
//!
//! Implementations may export to Prometheus or discard the counts in tests.

use async_trait::async_trait;

use crate::domain::EntityKind;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording resource metrics.
    pub enum ResourceMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "resource metrics exporter failed: {message}",
    }
}

/// Mutation outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
    Reordered,
}

impl Mutation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Reordered => "reordered",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceMetrics: Send + Sync {
    /// Count one completed mutation of `entity`.
    async fn record_mutation(
        &self,
        entity: EntityKind,
        mutation: Mutation,
    ) -> Result<(), ResourceMetricsError>;
}

/// No-op implementation for when metrics are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpResourceMetrics;

#[async_trait]
impl ResourceMetrics for NoOpResourceMetrics {
    async fn record_mutation(
        &self,
        _entity: EntityKind,
        _mutation: Mutation,
    ) -> Result<(), ResourceMetricsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_accepts_every_mutation() {
        for mutation in [
            Mutation::Created,
            Mutation::Updated,
            Mutation::Deleted,
            Mutation::Reordered,
        ] {
            assert!(
                NoOpResourceMetrics
                    .record_mutation(EntityKind::Section, mutation)
                    .await
                    .is_ok()
            );
        }
    }
}
