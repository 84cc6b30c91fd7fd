//! Folio backend core: ownership-checked CRUD over portfolio trees.
//!
//! The [`domain`] module owns every rule; [`outbound`] adapts PostgreSQL,
//! tracing and Prometheus to its ports; [`bootstrap`] wires the two.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bootstrap::{BootstrapError, FolioServices};
pub use config::FolioSettings;
pub use domain::{Error, ErrorCode, TraceId};
