//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and with the `test-support` feature.

pub mod in_memory_store;
pub mod recording_sinks;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::bootstrap::FolioServices;
use crate::domain::ports::ResourceStores;

pub use in_memory_store::{InMemoryStore, StoreOperation};
pub use recording_sinks::{RecordingAuditRecorder, RecordingResourceMetrics};

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Starts at 2026-03-14 09:00 UTC.
    pub fn at_fixture_time() -> Self {
        let start = match Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).single() {
            Some(start) => start,
            None => panic!("fixture timestamp is unambiguous"),
        };
        Self::new(start)
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Services wired to the in-memory store and recording sinks.
pub struct TestHarness {
    pub store: Arc<InMemoryStore>,
    pub audit: Arc<RecordingAuditRecorder>,
    pub metrics: Arc<RecordingResourceMetrics>,
    pub clock: Arc<MutableClock>,
    pub services: FolioServices,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let audit = Arc::new(RecordingAuditRecorder::default());
        let metrics = Arc::new(RecordingResourceMetrics::default());
        let clock = Arc::new(MutableClock::at_fixture_time());
        let services = FolioServices::new(
            ResourceStores::shared(Arc::clone(&store)),
            audit.clone(),
            metrics.clone(),
            clock.clone(),
        );
        Self {
            store,
            audit,
            metrics,
            clock,
            services,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
