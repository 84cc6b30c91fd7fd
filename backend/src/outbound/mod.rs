//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **audit**: structured `tracing` audit sink
//! - **metrics**: Prometheus mutation counters (feature-gated)
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod audit;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
