//! Audit and metrics sinks that remember what they were given.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::EntityKind;
use crate::domain::ports::{
    AuditAction, AuditEvent, AuditRecorder, AuditRecorderError, Mutation, ResourceMetrics,
    ResourceMetricsError,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("recording sink mutex"),
    }
}

/// Audit recorder keeping every event in memory.
#[derive(Default)]
pub struct RecordingAuditRecorder {
    events: Mutex<Vec<AuditEvent>>,
    failing: AtomicBool,
}

impl RecordingAuditRecorder {
    /// Events recorded so far, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        lock(&self.events).clone()
    }

    /// Events with the given action.
    pub fn events_with(&self, action: AuditAction) -> Vec<AuditEvent> {
        lock(&self.events)
            .iter()
            .filter(|event| event.action == action)
            .cloned()
            .collect()
    }

    /// Make every subsequent write fail without recording.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        lock(&self.events).clear();
    }
}

#[async_trait]
impl AuditRecorder for RecordingAuditRecorder {
    async fn record(&self, event: &AuditEvent) -> Result<(), AuditRecorderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuditRecorderError::write("audit sink offline"));
        }
        lock(&self.events).push(event.clone());
        Ok(())
    }
}

/// Metrics recorder keeping every count in memory.
#[derive(Default)]
pub struct RecordingResourceMetrics {
    mutations: Mutex<Vec<(EntityKind, Mutation)>>,
    failing: AtomicBool,
}

impl RecordingResourceMetrics {
    /// How many times `mutation` was counted for `entity`.
    pub fn count(&self, entity: EntityKind, mutation: Mutation) -> usize {
        lock(&self.mutations)
            .iter()
            .filter(|recorded| **recorded == (entity, mutation))
            .count()
    }

    pub fn total(&self) -> usize {
        lock(&self.mutations).len()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceMetrics for RecordingResourceMetrics {
    async fn record_mutation(
        &self,
        entity: EntityKind,
        mutation: Mutation,
    ) -> Result<(), ResourceMetricsError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ResourceMetricsError::export("exporter offline"));
        }
        lock(&self.mutations).push((entity, mutation));
        Ok(())
    }
}
