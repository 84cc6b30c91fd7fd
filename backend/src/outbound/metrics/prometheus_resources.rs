//! Prometheus adapter for resource mutation counts.
//!
//! # Metric definition
//!
//! - **Name**: `folio_resource_mutations_total`
//! - **Type**: Counter
//! - **Labels**:
//!   - `entity`: `user`, `portfolio`, `category`, `section`, `project` or
//!     `section_content`
//!   - `mutation`: `created`, `updated`, `deleted` or `reordered`

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::EntityKind;
use crate::domain::ports::{Mutation, ResourceMetrics, ResourceMetricsError};

/// Prometheus-backed resource metrics recorder.
pub struct PrometheusResourceMetrics {
    mutations_total: IntCounterVec,
}

impl PrometheusResourceMetrics {
    /// Create and register the counter with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let mutations_total = IntCounterVec::new(
            Opts::new(
                "folio_resource_mutations_total",
                "Completed resource mutations by entity and kind",
            ),
            &["entity", "mutation"],
        )?;
        registry.register(Box::new(mutations_total.clone()))?;
        Ok(Self { mutations_total })
    }
}

#[async_trait]
impl ResourceMetrics for PrometheusResourceMetrics {
    async fn record_mutation(
        &self,
        entity: EntityKind,
        mutation: Mutation,
    ) -> Result<(), ResourceMetricsError> {
        self.mutations_total
            .get_metric_with_label_values(&[entity.as_str(), mutation.as_str()])
            .map_err(|err| ResourceMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> Registry {
        Registry::new()
    }

    #[rstest]
    fn registers_the_counter_once(registry: Registry) {
        let _metrics = PrometheusResourceMetrics::new(&registry).expect("registration");

        assert!(PrometheusResourceMetrics::new(&registry).is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn counts_per_entity_and_mutation(registry: Registry) {
        let metrics = PrometheusResourceMetrics::new(&registry).expect("registration");

        for mutation in [Mutation::Created, Mutation::Created, Mutation::Reordered] {
            metrics
                .record_mutation(EntityKind::Category, mutation)
                .await
                .expect("recorded");
        }

        let created = metrics
            .mutations_total
            .with_label_values(&["category", "created"]);
        let reordered = metrics
            .mutations_total
            .with_label_values(&["category", "reordered"]);
        assert_eq!(created.get(), 2);
        assert_eq!(reordered.get(), 1);
        assert!(
            registry
                .gather()
                .iter()
                .any(|family| family.name() == "folio_resource_mutations_total")
        );
    }
}
